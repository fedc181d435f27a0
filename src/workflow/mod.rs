//! The stage-gated workflow: stages, state, and the orchestrator.

pub mod orchestrator;
pub mod stage;

pub use orchestrator::{
    Collaborators, EnvelopeError, ResponseBody, ResponseEnvelope, StageTransition,
    WorkflowOrchestrator, WorkflowState,
};
pub use stage::{UnknownStage, WorkflowStage};
