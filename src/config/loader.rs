//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{Result, ShopError};
use crate::schemas::ShopConfig;
use crate::store;

/// Load the shop configuration, falling back to defaults.
///
/// If `.repairdesk/config.json` exists it is read and missing fields take
/// their defaults. If it doesn't exist, the default configuration is returned.
///
/// # Errors
/// * `ConfigError` - If the file exists but names an unusable shop id
/// * `InvalidJson` - If the file is not valid JSON
pub fn load_config(root: &Path) -> Result<ShopConfig> {
    let config = store::read_config(root)?;
    if !store::is_valid_record_id(&config.shop_id) {
        return Err(ShopError::ConfigError(format!(
            "shop_id {:?} must be a single path segment of letters, digits, '-', '_' or '.'",
            config.shop_id
        )));
    }
    Ok(config)
}
