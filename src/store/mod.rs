//! Ticket persistence
//!
//! The stage core reads and writes tickets only through [`TicketStore`].
//! Two implementations ship with the crate: an in-memory map and a
//! file-backed store that keeps one JSON record per ticket.

mod file;
mod json;
mod memory;
mod paths;

use async_trait::async_trait;

use crate::errors::Result;
use crate::schemas::{Stage, Ticket};

pub use file::JsonTicketStore;
pub use json::{read_config, read_json, write_config, write_json};
pub use memory::MemoryTicketStore;
pub use paths::{
    find_shop_root, get_config_path, get_shops_dir, get_ticket_dir, get_ticket_json_path,
    get_tickets_dir, get_workspace_dir, is_valid_record_id, resolve_cwd, WORKSPACE_DIR,
};

/// Storage for repair tickets, partitioned by shop.
///
/// Concurrent writers are resolved last-write-wins; the store does not lock
/// tickets across sessions.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Fetch a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if no ticket has this id.
    async fn get_ticket(&self, id: &str) -> Result<Ticket>;

    /// Persist a new stage for a ticket and return the stored ticket.
    ///
    /// Writing the stage a ticket already has is a no-op, so repeating a
    /// call with the same arguments leaves the same final state.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` for unknown ids, or the underlying storage
    /// error if the write fails.
    async fn set_stage(&self, id: &str, stage: Stage) -> Result<Ticket>;

    /// Store a newly opened ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if a ticket with the same id already exists.
    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket>;

    /// All tickets of one shop, oldest first.
    async fn list_tickets(&self, shop_id: &str) -> Result<Vec<Ticket>>;
}
