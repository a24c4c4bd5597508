//! Application layer for HisMarketing.
//!
//! This crate provides the use cases that drive the client workflow:
//! authentication through the [`SessionGuard`], and the upload → analyze →
//! predict pipeline plus report downloads through the
//! [`WorkflowOrchestrator`].

pub mod messages;
pub mod orchestrator;
pub mod pipeline;
pub mod session_guard;
pub mod timers;

pub use orchestrator::WorkflowOrchestrator;
pub use pipeline::{Pipeline, PipelineState};
pub use session_guard::SessionGuard;
