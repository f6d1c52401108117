//! Schema types for repairdesk
//!
//! Serde types for tickets, roles and shop configuration as stored on disk.

mod config;
mod role;
mod ticket;

pub use config::ShopConfig;
pub use role::Role;
pub use ticket::{Stage, Ticket};
