//! Stage-editing sessions
//!
//! A [`StageSession`] is what a ticket view talks to: it routes clicks through
//! the transition policy, holds the rollback confirmation gate, commits through
//! the store and publishes [`StageEvent`]s.

mod events;
mod gate;
mod stage_session;

pub use events::StageEvent;
pub use gate::{ConfirmationGate, RollbackPrompt};
pub use stage_session::{ConfirmOutcome, RequestOutcome, StageSession};
