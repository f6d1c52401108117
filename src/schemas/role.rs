//! Role schema - Permission class of the acting user

use serde::{Deserialize, Serialize};

/// Permission class of the user driving a ticket session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Customer viewing their own ticket; read-only
    Client,
    /// Technician; pushes work forward one stage at a time
    Staff,
    /// Shop owner; may jump forward and roll back with confirmation
    Owner,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "CLIENT"),
            Role::Staff => write!(f, "STAFF"),
            Role::Owner => write!(f, "OWNER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENT" => Ok(Role::Client),
            "STAFF" => Ok(Role::Staff),
            "OWNER" => Ok(Role::Owner),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}
