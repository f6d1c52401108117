//! CLI command implementations

pub mod init;
pub mod list;
pub mod open;
pub mod show;
pub mod stage;
pub mod stages;

use std::path::Path;
use std::sync::Arc;

use crate::config::load_config;
use crate::errors::Result;
use crate::schemas::ShopConfig;
use crate::store::{find_shop_root, resolve_cwd, JsonTicketStore};

/// A located shop workspace with its config and store
pub(crate) struct Workspace {
    pub config: ShopConfig,
    pub store: Arc<JsonTicketStore>,
}

impl Workspace {
    pub(crate) fn locate(cwd: Option<&Path>) -> Result<Self> {
        let root = find_shop_root(&resolve_cwd(cwd))?;
        let config = load_config(&root)?;
        let store = Arc::new(JsonTicketStore::new(root.clone()));
        tracing::debug!(root = %root.display(), shop = %config.shop_id, "workspace located");
        Ok(Workspace { config, store })
    }
}
