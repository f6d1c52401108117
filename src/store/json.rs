//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, ShopError};
use crate::schemas::ShopConfig;

use super::paths::get_config_path;

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShopError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            ShopError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ShopError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| ShopError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file for a shop workspace.
///
/// Returns the default config if the file doesn't exist.
pub fn read_config(root: &Path) -> Result<ShopConfig> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(ShopConfig::default());
    }
    read_json(&path)
}

/// Write the config.json file for a shop workspace.
pub fn write_config(root: &Path, config: &ShopConfig) -> Result<()> {
    write_json(&get_config_path(root), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Ticket;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<Ticket> = read_json(&path);
        assert!(matches!(result.unwrap_err(), ShopError::FileNotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<Ticket> = read_json(&path);
        assert!(matches!(result.unwrap_err(), ShopError::InvalidJson(_)));
    }

    #[test]
    fn test_write_json_creates_parent_dirs_and_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("ticket.json");

        let ticket = Ticket::new("t-1".to_string(), "shop-a".to_string(), "c-1".to_string());
        write_json(&path, &ticket).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let read: Ticket = read_json(&path).unwrap();
        assert_eq!(read, ticket);
    }

    #[test]
    fn test_config_round_trip_on_disk() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_config(temp.path()).unwrap(), ShopConfig::default());

        let config = ShopConfig {
            shop_id: "northside".to_string(),
            ..Default::default()
        };
        write_config(temp.path(), &config).unwrap();
        assert_eq!(read_config(temp.path()).unwrap().shop_id, "northside");
    }
}
