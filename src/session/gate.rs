//! Rollback confirmation gate

use crate::schemas::Stage;

/// Per-session holder for at most one staged rollback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationGate {
    /// Nothing waiting for the user
    #[default]
    Idle,
    /// A rollback to `target` is waiting for confirm or cancel
    Pending { target: Stage },
}

impl ConfirmationGate {
    /// Stage a rollback target. A target already waiting is replaced.
    pub fn stage(&mut self, target: Stage) {
        *self = ConfirmationGate::Pending { target };
    }

    pub fn pending_target(&self) -> Option<Stage> {
        match self {
            ConfirmationGate::Idle => None,
            ConfirmationGate::Pending { target } => Some(*target),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ConfirmationGate::Pending { .. })
    }

    /// Return to idle, handing back whatever was staged
    pub fn clear(&mut self) -> Option<Stage> {
        let target = self.pending_target();
        *self = ConfirmationGate::Idle;
        target
    }
}

/// What the UI shows while a rollback waits for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackPrompt {
    pub ticket_id: String,
    pub target: Stage,
    pub label: &'static str,
    pub notice: String,
}

impl RollbackPrompt {
    pub fn new(ticket_id: impl Into<String>, target: Stage) -> Self {
        let label = target.label();
        RollbackPrompt {
            ticket_id: ticket_id.into(),
            target,
            label,
            notice: format!(
                "Move this ticket back to \"{}\"? The client will be notified of the change.",
                label
            ),
        }
    }
}
