//! Repair stage sequence definitions
//!
//! Tickets move through a fixed, ordered sequence:
//! Checked In → Diagnosing → Waiting Approval → Repair In Progress →
//! Quality Check → Ready for Pickup → Completed

use crate::schemas::Stage;

/// The canonical ordering of repair stages.
///
/// IMPORTANT: This is the source of truth for stage ordering. A ticket's
/// `stage_index` indexes into this slice.
pub const STAGES: &[Stage] = &[
    Stage::CheckedIn,
    Stage::Diagnosing,
    Stage::WaitingApproval,
    Stage::RepairInProgress,
    Stage::QualityCheck,
    Stage::ReadyForPickup,
    Stage::Completed,
];

/// Number of stages in the sequence
pub const STAGE_COUNT: usize = STAGES.len();

/// Map a requested index onto the stage sequence.
///
/// Anything below zero becomes the first stage and anything past the end
/// becomes the last one. Out-of-range requests are never an error.
pub fn clamp_stage_index(requested: i64) -> Stage {
    if requested <= 0 {
        return STAGES[0];
    }
    let index = usize::try_from(requested).unwrap_or(usize::MAX);
    STAGES[index.min(STAGE_COUNT - 1)]
}

/// Returns the stage after `current`, or None for the terminal stage.
pub fn get_next_stage(current: Stage) -> Option<Stage> {
    STAGES.get(current.index() + 1).copied()
}

/// Check if a stage is the terminal stage (Completed).
pub fn is_terminal_stage(stage: Stage) -> bool {
    stage.index() == STAGE_COUNT - 1
}

/// Human-readable labels in sequence order
pub fn stage_labels() -> Vec<&'static str> {
    STAGES.iter().map(|s| s.label()).collect()
}
