//! Role-based rules for stage transitions

use crate::schemas::{Role, Stage};

use super::stages::{clamp_stage_index, get_next_stage};

/// Why a requested transition will not be attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The role may only watch the ticket
    ReadOnlyRole,
    /// Staff asked for something other than the immediately following stage
    NotNextStage,
    /// The requested stage is the current one
    NoChange,
    /// The request names a different ticket than the one it was resolved against
    TicketMismatch,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::ReadOnlyRole => write!(f, "role cannot change ticket stages"),
            DenialReason::NotNextStage => write!(f, "staff may only advance to the next stage"),
            DenialReason::NoChange => write!(f, "ticket is already at that stage"),
            DenialReason::TicketMismatch => write!(f, "request is for a different ticket"),
        }
    }
}

/// Outcome of evaluating a stage request against the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    /// Commit without further interaction
    Immediate { target: Stage },
    /// Rollback; commit only after the user confirms
    NeedsConfirmation { target: Stage },
    /// Do nothing
    Denied { reason: DenialReason },
}

impl TransitionDecision {
    pub fn is_denied(&self) -> bool {
        matches!(self, TransitionDecision::Denied { .. })
    }

    /// Target stage for permitted decisions
    pub fn target(&self) -> Option<Stage> {
        match self {
            TransitionDecision::Immediate { target }
            | TransitionDecision::NeedsConfirmation { target } => Some(*target),
            TransitionDecision::Denied { .. } => None,
        }
    }
}

/// Decide what a role may do when asking to move from `current` to `target`.
///
/// | role   | target               | decision          |
/// |--------|----------------------|-------------------|
/// | CLIENT | any                  | denied            |
/// | STAFF  | current + 1          | immediate         |
/// | STAFF  | anything else        | denied            |
/// | OWNER  | after current        | immediate         |
/// | OWNER  | before current       | needs confirmation|
/// | OWNER  | current              | denied            |
pub fn evaluate_transition(role: Role, current: Stage, target: Stage) -> TransitionDecision {
    match role {
        Role::Client => TransitionDecision::Denied {
            reason: DenialReason::ReadOnlyRole,
        },
        Role::Staff => {
            if target == current {
                TransitionDecision::Denied {
                    reason: DenialReason::NoChange,
                }
            } else if get_next_stage(current) == Some(target) {
                TransitionDecision::Immediate { target }
            } else {
                TransitionDecision::Denied {
                    reason: DenialReason::NotNextStage,
                }
            }
        }
        Role::Owner => match target.cmp(&current) {
            std::cmp::Ordering::Greater => TransitionDecision::Immediate { target },
            std::cmp::Ordering::Less => TransitionDecision::NeedsConfirmation { target },
            std::cmp::Ordering::Equal => TransitionDecision::Denied {
                reason: DenialReason::NoChange,
            },
        },
    }
}

/// Clamp a raw requested index, then evaluate it.
pub fn decide_transition(role: Role, current: Stage, requested_index: i64) -> TransitionDecision {
    evaluate_transition(role, current, clamp_stage_index(requested_index))
}

/// Whether a stage position accepts clicks from this role.
pub fn is_affordant(role: Role, current: Stage, position: Stage) -> bool {
    match role {
        Role::Client => false,
        Role::Staff => get_next_stage(current) == Some(position),
        Role::Owner => position != current,
    }
}
