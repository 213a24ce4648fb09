//! The deployment registry: freezing a completed run into a queryable fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::providers::LlmConfig;
use crate::types::NodeKind;

use super::error::WorkflowError;
use super::store::WorkflowState;

/// A completed run frozen for reuse: captured input, captured output, and a
/// copy of the llm node's configuration at deploy time.
///
/// Immutable once created; a later deploy replaces it wholesale and
/// undeploying simply drops the reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployedSnapshot {
    /// Input text captured at deploy time.
    pub input: String,
    /// Output text captured at deploy time.
    pub output: String,
    /// Provider configuration frozen at deploy time.
    pub config: LlmConfig,
    /// When the snapshot was taken.
    pub deployed_at: DateTime<Utc>,
}

impl WorkflowState {
    /// The current snapshot, if any.
    #[must_use]
    pub fn deployed(&self) -> Option<&DeployedSnapshot> {
        self.deployed.as_ref()
    }

    /// Freezes the last run into a snapshot, replacing any prior one.
    ///
    /// Requires all three nodes and a non-empty output payload (i.e. a
    /// successful run has occurred). On failure the error slot is set and
    /// nothing changes.
    pub fn deploy(&mut self) -> Result<&DeployedSnapshot, WorkflowError> {
        match self.capture_snapshot() {
            Ok(snapshot) => {
                tracing::info!(input = %snapshot.input, "workflow deployed");
                self.error = None;
                Ok(&*self.deployed.insert(snapshot))
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Drops the snapshot. No other side effects.
    pub fn undeploy(&mut self) {
        if self.deployed.take().is_some() {
            tracing::info!("workflow undeployed");
        }
    }

    /// Answers a free-text query from the deployed snapshot.
    ///
    /// A query containing the captured input (case-insensitively) is a cache
    /// hit and returns the captured output verbatim with no network call.
    /// Anything else re-dispatches against the frozen configuration, never
    /// the live graph.
    pub async fn answer_query(&self, query: &str) -> Result<String, WorkflowError> {
        let snapshot = self.deployed.as_ref().ok_or(WorkflowError::NotDeployed)?;

        if query
            .to_lowercase()
            .contains(&snapshot.input.to_lowercase())
        {
            tracing::debug!("query answered from deployed snapshot");
            return Ok(snapshot.output.clone());
        }

        tracing::debug!("query missed the snapshot, dispatching against frozen config");
        let text = self.dispatcher.dispatch(query, &snapshot.config).await?;
        Ok(text)
    }

    fn capture_snapshot(&self) -> Result<DeployedSnapshot, WorkflowError> {
        let input = self.graph.first_of_kind(NodeKind::Input);
        let llm = self.graph.first_of_kind(NodeKind::Llm);
        let output = self.graph.first_of_kind(NodeKind::Output);
        let (Some(input), Some(llm), Some(output)) = (input, llm, output) else {
            return Err(WorkflowError::DeployIncomplete);
        };

        let output_text = output.output_text().unwrap_or_default();
        if output_text.is_empty() {
            return Err(WorkflowError::DeployBeforeRun);
        }

        Ok(DeployedSnapshot {
            input: input.input_text().unwrap_or_default().to_string(),
            output: output_text.to_string(),
            config: llm.llm_config().cloned().unwrap_or_default(),
            deployed_at: Utc::now(),
        })
    }
}
