//! Workflow failure taxonomy.
//!
//! Every variant's Display form is the exact user-facing message for the
//! single replaceable error slot; provider failures delegate to their own
//! status classification. None of these are fatal to the process: a failed
//! run or deploy leaves the session interactive.

use thiserror::Error;

use crate::providers::ProviderError;
use crate::types::NodeId;

/// Failures raised by workflow lifecycle operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A run was requested without both an input and an llm node.
    #[error("Please add Input and LLM nodes to the workflow")]
    MissingCoreNodes,

    /// The llm node has no credential.
    #[error("Please add your API key")]
    MissingApiKey,

    /// The google route requires a search-engine identifier.
    #[error("Please add your Search Engine ID")]
    MissingSearchEngineId,

    /// The input node's text is empty after trimming.
    #[error("Please add some input text")]
    EmptyInput,

    /// No output node exists to receive the result.
    #[error("Workflow is incomplete. Add all required nodes.")]
    IncompleteWorkflow,

    /// The input→llm or llm→output edge is missing.
    #[error("Please connect the nodes in order: Input → LLM → Output")]
    NodesNotConnected,

    /// A deploy was requested on an incomplete graph.
    #[error("Cannot deploy incomplete workflow")]
    DeployIncomplete,

    /// A deploy was requested before any successful run.
    #[error("Please run the workflow before deploying")]
    DeployBeforeRun,

    /// A query arrived with no deployed snapshot to answer it.
    #[error("No deployed workflow available")]
    NotDeployed,

    /// A structural edit addressed a node that is not in the graph.
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// A structural edit named a field the addressed node does not carry.
    #[error("edit field '{field}' does not apply to node {id}")]
    EditMismatch { id: NodeId, field: &'static str },

    /// The dispatch itself failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl WorkflowError {
    /// The message to place in the user-visible error slot.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
