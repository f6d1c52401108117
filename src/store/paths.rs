//! Path resolution utilities for repairdesk
//!
//! Provides functions to locate the shop workspace root and construct paths
//! to configuration and per-ticket records.

use std::path::{Path, PathBuf};

use crate::errors::{Result, ShopError};

/// Name of the workspace directory that marks a shop root
pub const WORKSPACE_DIR: &str = ".repairdesk";

/// Find the workspace root containing a .repairdesk directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `ShopNotFound` - If no ancestor contains .repairdesk
pub fn find_shop_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| ShopError::ShopNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(WORKSPACE_DIR).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(ShopError::ShopNotFound(format!(
                    "Could not find a {} directory; run `repairdesk init` first",
                    WORKSPACE_DIR
                )));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Whether an id or shop id is safe to use as a single path component
pub fn is_valid_record_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Get the path to the .repairdesk directory.
pub fn get_workspace_dir(root: &Path) -> PathBuf {
    root.join(WORKSPACE_DIR)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_workspace_dir(root).join("config.json")
}

/// Get the path to the shops directory.
pub fn get_shops_dir(root: &Path) -> PathBuf {
    get_workspace_dir(root).join("shops")
}

/// Get the path to a shop's ticket directory.
pub fn get_tickets_dir(root: &Path, shop_id: &str) -> PathBuf {
    get_shops_dir(root).join(shop_id).join("tickets")
}

/// Get the path to a specific ticket's directory.
pub fn get_ticket_dir(root: &Path, shop_id: &str, id: &str) -> PathBuf {
    get_tickets_dir(root, shop_id).join(id)
}

/// Get the path to a ticket's ticket.json file.
pub fn get_ticket_json_path(root: &Path, shop_id: &str, id: &str) -> PathBuf {
    get_ticket_dir(root, shop_id, id).join("ticket.json")
}
