//! Core identifier types for the loomboard workflow engine.
//!
//! These are the fundamental types that define what a workflow graph *is*:
//! node identity, the closed set of stage kinds, and canvas positions.
//! Runtime lifecycle types live in [`crate::workflow`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node in the workflow graph.
///
/// Node ids are opaque strings. The canvas layer may supply its own ids when
/// reporting drops; [`NodeId::generate`] mints a fresh one otherwise.
///
/// # Examples
///
/// ```
/// use loomboard::types::NodeId;
///
/// let id = NodeId::from("input-1");
/// assert_eq!(id.as_str(), "input-1");
///
/// let generated = NodeId::generate();
/// assert_ne!(generated, id);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Mints a fresh, unique node id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an edge in the workflow graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Mints a fresh, unique edge id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of stage kinds a workflow node can have.
///
/// A well-formed pipeline wires exactly one node of each kind in order:
/// `Input → Llm → Output`. The kind is derived from a node's payload variant,
/// so the two can never disagree.
///
/// # Examples
///
/// ```
/// use loomboard::types::NodeKind;
///
/// assert_eq!(NodeKind::Input.to_string(), "input");
/// assert_eq!(NodeKind::Llm.to_string(), "llm");
/// assert!(NodeKind::Output.is_output());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Source stage carrying the free-text query.
    Input,
    /// Middle stage holding the provider configuration.
    Llm,
    /// Sink stage receiving the run result.
    Output,
}

impl NodeKind {
    /// Returns `true` if this is the [`Input`](Self::Input) kind.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input)
    }

    /// Returns `true` if this is the [`Llm`](Self::Llm) kind.
    #[must_use]
    pub fn is_llm(&self) -> bool {
        matches!(self, Self::Llm)
    }

    /// Returns `true` if this is the [`Output`](Self::Output) kind.
    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Llm => write!(f, "llm"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Canvas coordinates of a node, reported by the rendering layer on drop and
/// move events. The engine stores them verbatim for re-rendering and attaches
/// no meaning to them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_display_is_lowercase() {
        assert_eq!(NodeKind::Input.to_string(), "input");
        assert_eq!(NodeKind::Llm.to_string(), "llm");
        assert_eq!(NodeKind::Output.to_string(), "output");
    }

    #[test]
    fn node_kind_serde_round_trip() {
        let json = serde_json::to_string(&NodeKind::Llm).unwrap();
        assert_eq!(json, "\"llm\"");
        let back: NodeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeKind::Llm);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(NodeId::generate(), NodeId::generate());
        assert_ne!(EdgeId::generate(), EdgeId::generate());
    }
}
