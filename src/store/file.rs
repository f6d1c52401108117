//! File-backed ticket store
//!
//! Layout: `<root>/.repairdesk/shops/<shop_id>/tickets/<id>/ticket.json`.
//! Every mutation rewrites only the record it touches.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::{Result, ShopError};
use crate::schemas::{Stage, Ticket};

use super::json::{read_json, write_json};
use super::paths::{get_shops_dir, get_ticket_json_path, get_tickets_dir, is_valid_record_id};
use super::TicketStore;

/// Ticket store keeping one JSON file per ticket under a workspace root
#[derive(Debug, Clone)]
pub struct JsonTicketStore {
    root: PathBuf,
}

impl JsonTicketStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonTicketStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the record for a ticket id in whichever shop holds it
    fn find_ticket_path(&self, id: &str) -> Result<PathBuf> {
        if !is_valid_record_id(id) {
            return Err(ShopError::TicketNotFound(id.to_string()));
        }

        let shops_dir = get_shops_dir(&self.root);
        let entries = match fs::read_dir(&shops_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ShopError::TicketNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            let shop_id = entry.file_name();
            let path = get_ticket_json_path(&self.root, &shop_id.to_string_lossy(), id);
            if path.is_file() {
                return Ok(path);
            }
        }

        Err(ShopError::TicketNotFound(id.to_string()))
    }
}

// Blocking file access; the trait impl runs these through `blocking`.
impl JsonTicketStore {
    fn read_ticket(&self, id: &str) -> Result<Ticket> {
        let path = self.find_ticket_path(id)?;
        read_json(&path)
    }

    fn write_stage(&self, id: &str, stage: Stage) -> Result<Ticket> {
        let path = self.find_ticket_path(id)?;
        let current: Ticket = read_json(&path)?;
        let next = current.clone().with_stage(stage);
        if next != current {
            write_json(&path, &next)?;
            tracing::debug!(ticket = id, stage = stage.index(), "ticket record written");
        }
        Ok(next)
    }

    fn write_new_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        if !is_valid_record_id(ticket.id()) || !is_valid_record_id(ticket.shop_id()) {
            return Err(ShopError::wrap(
                format!("invalid ticket id {:?} or shop id {:?}", ticket.id(), ticket.shop_id()),
                "create ticket",
            ));
        }
        if self.find_ticket_path(ticket.id()).is_ok() {
            return Err(ShopError::wrap(
                format!("ticket {} already exists", ticket.id()),
                "create ticket",
            ));
        }

        let path = get_ticket_json_path(&self.root, ticket.shop_id(), ticket.id());
        write_json(&path, &ticket)?;
        Ok(ticket)
    }

    fn read_shop_tickets(&self, shop_id: &str) -> Result<Vec<Ticket>> {
        if !is_valid_record_id(shop_id) {
            return Ok(Vec::new());
        }

        let dir = get_tickets_dir(&self.root, shop_id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut tickets = Vec::new();
        for entry in entries {
            let path = entry?.path().join("ticket.json");
            if path.is_file() {
                tickets.push(read_json::<Ticket>(&path)?);
            }
        }
        tickets.sort_by(|a, b| a.created_at().cmp(b.created_at()).then(a.id().cmp(b.id())));
        Ok(tickets)
    }
}

/// Run a blocking store operation on tokio's blocking pool
async fn blocking<T, F>(op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ShopError::wrap(e, "ticket store task"))?
}

#[async_trait]
impl TicketStore for JsonTicketStore {
    async fn get_ticket(&self, id: &str) -> Result<Ticket> {
        let store = self.clone();
        let id = id.to_string();
        blocking(move || store.read_ticket(&id)).await
    }

    async fn set_stage(&self, id: &str, stage: Stage) -> Result<Ticket> {
        let store = self.clone();
        let id = id.to_string();
        blocking(move || store.write_stage(&id, stage)).await
    }

    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        let store = self.clone();
        blocking(move || store.write_new_ticket(ticket)).await
    }

    async fn list_tickets(&self, shop_id: &str) -> Result<Vec<Ticket>> {
        let store = self.clone();
        let shop_id = shop_id.to_string();
        blocking(move || store.read_shop_tickets(&shop_id)).await
    }
}
