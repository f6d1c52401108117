//! Stage change events published to the surrounding app

use serde::{Deserialize, Serialize};

use crate::schemas::{Role, Stage};

/// A committed stage change. Delivery to the client (chat, push) is up to
/// whoever subscribes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageEvent {
    /// Ticket moved forward
    Advanced {
        ticket_id: String,
        shop_id: String,
        from: Stage,
        to: Stage,
        actor: Role,
    },
    /// Ticket moved back after an owner confirmed the rollback
    RolledBack {
        ticket_id: String,
        shop_id: String,
        from: Stage,
        to: Stage,
        actor: Role,
    },
}

impl StageEvent {
    /// Build the event for a committed move from `from` to `to`
    pub fn committed(
        ticket_id: impl Into<String>,
        shop_id: impl Into<String>,
        from: Stage,
        to: Stage,
        actor: Role,
    ) -> Self {
        let ticket_id = ticket_id.into();
        let shop_id = shop_id.into();
        if to < from {
            StageEvent::RolledBack {
                ticket_id,
                shop_id,
                from,
                to,
                actor,
            }
        } else {
            StageEvent::Advanced {
                ticket_id,
                shop_id,
                from,
                to,
                actor,
            }
        }
    }

    pub fn ticket_id(&self) -> &str {
        match self {
            StageEvent::Advanced { ticket_id, .. } | StageEvent::RolledBack { ticket_id, .. } => {
                ticket_id
            }
        }
    }

    pub fn target(&self) -> Stage {
        match self {
            StageEvent::Advanced { to, .. } | StageEvent::RolledBack { to, .. } => *to,
        }
    }

    /// Whether the client has to be told about this change
    pub fn notifies_client(&self) -> bool {
        matches!(self, StageEvent::RolledBack { .. })
    }

    /// Text for the client-facing notification
    pub fn notice(&self) -> String {
        match self {
            StageEvent::Advanced { to, .. } => format!("ticket stage advanced to {}", to.label()),
            StageEvent::RolledBack { to, .. } => {
                format!("ticket stage rolled back to {}", to.label())
            }
        }
    }
}
