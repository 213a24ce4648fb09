//! Workflow lifecycle: the store, the run state machine, structural edit
//! commands, the failure taxonomy, and the deployment registry.
//!
//! The store is an explicit [`WorkflowState`] value owned by the composition
//! root and passed by reference to consumers; there is no process-wide
//! singleton. States are `Idle` and `Running`; a run transitions to
//! `Running` on entry and back to `Idle` unconditionally when the dispatch
//! settles, success or failure.

mod deploy;
mod edits;
mod error;
mod store;

pub use deploy::DeployedSnapshot;
pub use edits::NodeEdit;
pub use error::WorkflowError;
pub use store::{RunStatus, WorkflowState};
