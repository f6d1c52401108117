//! Init command - Create a shop workspace

use std::path::Path;

use crate::errors::{Result, ShopError};
use crate::schemas::ShopConfig;
use crate::store::{get_config_path, get_shops_dir, is_valid_record_id, resolve_cwd, write_config};

/// Create `.repairdesk/config.json` in the given directory
pub async fn run(cwd: Option<&Path>, shop_id: Option<&str>, force: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let config_path = get_config_path(&root);

    if config_path.exists() && !force {
        return Err(ShopError::ConfigError(format!(
            "{} already exists; pass --force to overwrite it",
            config_path.display()
        )));
    }

    let mut config = ShopConfig::default();
    if let Some(shop_id) = shop_id {
        if !is_valid_record_id(shop_id) {
            return Err(ShopError::ConfigError(format!("Invalid shop id: {:?}", shop_id)));
        }
        config.shop_id = shop_id.to_string();
    }

    write_config(&root, &config)?;
    std::fs::create_dir_all(get_shops_dir(&root).join(&config.shop_id))?;

    tracing::info!(root = %root.display(), shop = %config.shop_id, "workspace initialized");
    println!("Initialized shop '{}' in {}", config.shop_id, root.display());
    Ok(())
}
