//! In-memory ticket store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::{Result, ShopError};
use crate::schemas::{Stage, Ticket};

use super::TicketStore;

/// Ticket store backed by a map, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryTicketStore {
    tickets: Mutex<HashMap<String, Ticket>>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with tickets
    pub fn with_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        let tickets = tickets
            .into_iter()
            .map(|t| (t.id().to_string(), t))
            .collect();
        MemoryTicketStore {
            tickets: Mutex::new(tickets),
        }
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn get_ticket(&self, id: &str) -> Result<Ticket> {
        let tickets = self.tickets.lock().await;
        tickets
            .get(id)
            .cloned()
            .ok_or_else(|| ShopError::TicketNotFound(id.to_string()))
    }

    async fn set_stage(&self, id: &str, stage: Stage) -> Result<Ticket> {
        let mut tickets = self.tickets.lock().await;
        let ticket = tickets
            .get_mut(id)
            .ok_or_else(|| ShopError::TicketNotFound(id.to_string()))?;
        *ticket = ticket.clone().with_stage(stage);
        Ok(ticket.clone())
    }

    async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        let mut tickets = self.tickets.lock().await;
        if tickets.contains_key(ticket.id()) {
            return Err(ShopError::wrap(
                format!("ticket {} already exists", ticket.id()),
                "create ticket",
            ));
        }
        tickets.insert(ticket.id().to_string(), ticket.clone());
        Ok(ticket)
    }

    async fn list_tickets(&self, shop_id: &str) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.lock().await;
        let mut found: Vec<Ticket> = tickets
            .values()
            .filter(|t| t.shop_id() == shop_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()).then(a.id().cmp(b.id())));
        Ok(found)
    }
}
