//! Workflow nodes and their kind-specific payloads.

use serde::{Deserialize, Serialize};

use crate::providers::LlmConfig;
use crate::types::{NodeId, NodeKind, Position};

/// Kind-specific content of a node, as a tagged sum.
///
/// Each variant carries only the fields relevant to its stage, so the
/// validator and runner pattern-match exhaustively instead of probing
/// possibly-absent fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodePayload {
    /// Free-text query to forward through the pipeline.
    Input { text: String },
    /// Provider configuration for the middle stage.
    Llm(LlmConfig),
    /// Last computed result, empty until a run succeeds.
    Output { text: String },
}

impl NodePayload {
    /// The stage kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Input { .. } => NodeKind::Input,
            Self::Llm(_) => NodeKind::Llm,
            Self::Output { .. } => NodeKind::Output,
        }
    }
}

/// A typed unit in the workflow graph.
///
/// Nodes are created when the canvas reports a drop and live until removed or
/// the workflow is reset. The kind is derived from the payload variant.
///
/// # Examples
///
/// ```
/// use loomboard::graph::Node;
/// use loomboard::types::{NodeKind, Position};
///
/// let node = Node::input("2+2", Position::new(80.0, 120.0));
/// assert_eq!(node.kind(), NodeKind::Input);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identity within the graph.
    pub id: NodeId,
    /// Canvas coordinates, stored verbatim for re-rendering.
    pub position: Position,
    /// Kind-specific content.
    pub payload: NodePayload,
}

impl Node {
    /// Creates a node with a generated id and the given payload.
    #[must_use]
    pub fn new(position: Position, payload: NodePayload) -> Self {
        Self {
            id: NodeId::generate(),
            position,
            payload,
        }
    }

    /// Creates an input node carrying the given text.
    #[must_use]
    pub fn input(text: impl Into<String>, position: Position) -> Self {
        Self::new(position, NodePayload::Input { text: text.into() })
    }

    /// Creates an llm node with the given provider configuration.
    #[must_use]
    pub fn llm(config: LlmConfig, position: Position) -> Self {
        Self::new(position, NodePayload::Llm(config))
    }

    /// Creates an output node with an empty result.
    #[must_use]
    pub fn output(position: Position) -> Self {
        Self::new(
            position,
            NodePayload::Output {
                text: String::new(),
            },
        )
    }

    /// The stage kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    /// The input text, if this is an input node.
    #[must_use]
    pub fn input_text(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Input { text } => Some(text),
            _ => None,
        }
    }

    /// The provider configuration, if this is an llm node.
    #[must_use]
    pub fn llm_config(&self) -> Option<&LlmConfig> {
        match &self.payload {
            NodePayload::Llm(config) => Some(config),
            _ => None,
        }
    }

    /// The computed result, if this is an output node.
    #[must_use]
    pub fn output_text(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Output { text } => Some(text),
            _ => None,
        }
    }
}
