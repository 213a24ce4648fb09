//! Structural edit commands emitted by the UI layer.
//!
//! Form widgets do not capture mutation closures at node-creation time;
//! they emit a [`NodeEdit`] addressed by node id and the store looks the
//! node up and applies the change.

use serde::{Deserialize, Serialize};

/// A single field change on a node's payload.
///
/// Input-stage fields and llm-stage fields are distinct variants; applying
/// an edit to a node of the wrong kind is an
/// [`EditMismatch`](crate::workflow::WorkflowError::EditMismatch) error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum NodeEdit {
    /// Replace the input node's query text.
    InputText(String),
    /// Select a different provider model.
    Model(String),
    /// Replace the provider credential.
    ApiKey(String),
    /// Set or clear the token budget.
    MaxTokens(Option<u32>),
    /// Set or clear the sampling temperature.
    Temperature(Option<f32>),
    /// Set or clear the search-engine identifier.
    SearchEngineId(Option<String>),
    /// Set or clear the secondary search credential.
    SerpApiKey(Option<String>),
}

impl NodeEdit {
    /// Field name for diagnostics.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::InputText(_) => "input_text",
            Self::Model(_) => "model",
            Self::ApiKey(_) => "api_key",
            Self::MaxTokens(_) => "max_tokens",
            Self::Temperature(_) => "temperature",
            Self::SearchEngineId(_) => "search_engine_id",
            Self::SerpApiKey(_) => "serp_api_key",
        }
    }
}
