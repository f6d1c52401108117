//! Stage transition logic
//!
//! Pure functions for resolving stage requests against tickets.

use crate::schemas::{Role, Stage, Ticket};

use super::policy::{decide_transition, DenialReason, TransitionDecision};

/// A user's ask to move a ticket. Exists only while it is being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTransitionRequest {
    pub ticket_id: String,
    /// Raw index from the UI; clamped before the policy sees it
    pub requested_index: i64,
    pub role: Role,
}

/// Result of resolving a stage request
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult {
    /// Permitted now; the ticket as it should be committed
    Apply {
        /// The ticket with the new stage and timestamp
        next_ticket: Ticket,
    },
    /// Rollback that must be confirmed before anything changes
    AwaitConfirmation { target: Stage },
    /// Not permitted; nothing to do
    Denied { reason: DenialReason },
}

impl TransitionResult {
    /// Check if the ticket should be committed right away
    pub fn is_apply(&self) -> bool {
        matches!(self, TransitionResult::Apply { .. })
    }

    /// Check if the request was denied
    pub fn is_denied(&self) -> bool {
        matches!(self, TransitionResult::Denied { .. })
    }

    /// Get the next ticket if the request applies immediately
    pub fn ticket(self) -> Option<Ticket> {
        match self {
            TransitionResult::Apply { next_ticket } => Some(next_ticket),
            _ => None,
        }
    }
}

/// Pure function that resolves a stage request for a ticket.
///
/// This function:
/// - Never mutates the input ticket
/// - Clamps the requested index into the stage sequence
/// - Applies the role policy
/// - Returns the ticket to commit only for immediate transitions
pub fn resolve_request(ticket: &Ticket, role: Role, requested_index: i64) -> TransitionResult {
    match decide_transition(role, ticket.stage(), requested_index) {
        TransitionDecision::Immediate { target } => TransitionResult::Apply {
            next_ticket: apply_stage(ticket, target),
        },
        TransitionDecision::NeedsConfirmation { target } => {
            TransitionResult::AwaitConfirmation { target }
        }
        TransitionDecision::Denied { reason } => TransitionResult::Denied { reason },
    }
}

/// Resolve a full request value against the ticket it names.
///
/// A request carrying another ticket's id is denied.
pub fn resolve(ticket: &Ticket, request: &StageTransitionRequest) -> TransitionResult {
    if request.ticket_id != ticket.id() {
        return TransitionResult::Denied {
            reason: DenialReason::TicketMismatch,
        };
    }
    resolve_request(ticket, request.role, request.requested_index)
}

/// Produce the ticket at `target`. Callers reach this only after the policy
/// has permitted the move (directly or through a confirmed rollback).
pub(crate) fn apply_stage(ticket: &Ticket, target: Stage) -> Ticket {
    ticket.clone().with_stage(target)
}
