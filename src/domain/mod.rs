//! Domain logic for repair stages and role-gated transitions

mod policy;
mod stages;
mod transitions;


pub use policy::{
    decide_transition, evaluate_transition, is_affordant, DenialReason, TransitionDecision,
};
pub use stages::{
    clamp_stage_index, get_next_stage, is_terminal_stage, stage_labels, STAGES, STAGE_COUNT,
};
pub(crate) use transitions::apply_stage;
pub use transitions::{resolve, resolve_request, StageTransitionRequest, TransitionResult};
