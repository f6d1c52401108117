//! Config schema - Per-shop configuration for repairdesk

use serde::{Deserialize, Serialize};

/// Main configuration for a shop workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Shop partition that tickets are opened in and listed from
    #[serde(default = "default_shop_id")]
    pub shop_id: String,

    /// Display name of the shop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,

    /// How long the newly active stage keeps its fill highlight, in milliseconds
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_shop_id() -> String {
    "default".to_string()
}

fn default_flash_duration_ms() -> u64 {
    1200
}

impl ShopConfig {
    /// Fill highlight duration as a chrono duration
    pub fn flash_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.flash_duration_ms).unwrap_or(i64::MAX))
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            schema_version: 1,
            shop_id: default_shop_id(),
            shop_name: None,
            flash_duration_ms: default_flash_duration_ms(),
        }
    }
}
