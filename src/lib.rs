//! Repairdesk - repair ticket stage tracking for auto shops
//!
//! This library provides the stage-progression core of a shop management
//! system:
//! - Schema definitions for tickets, roles, stages and shop config
//! - Domain logic for the seven-stage lifecycle and role-gated transitions
//! - Stage sessions with the rollback confirmation gate and change events
//! - The derived progress-track view and its ratatui widget
//! - Ticket stores (in-memory and per-record JSON files)

pub mod cli;
pub mod config;
pub mod display;
pub mod domain;
pub mod errors;
pub mod schemas;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use errors::{Result, ShopError};
pub use schemas::{Role, ShopConfig, Stage, Ticket};
pub use session::{StageEvent, StageSession};
pub use store::{JsonTicketStore, MemoryTicketStore, TicketStore};
