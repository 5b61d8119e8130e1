// Hiring pipeline: stage definitions and the transitions between them

pub mod stage;
pub mod state_machine;

pub use stage::{PipelineStage, StageCell, DISCARDED_BY_RECRUITER};
pub use state_machine::{
    next_stage, PipelineError, PipelineStateMachine, StageTransition, TransitionResult,
    UnchangedReason,
};
