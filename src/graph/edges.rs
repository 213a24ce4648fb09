//! Edge types: committed edges and the canvas's proposed connections.

use serde::{Deserialize, Serialize};

use crate::types::{EdgeId, NodeId};

/// A connection proposal reported by the canvas layer.
///
/// Carries the ordered endpoint pair plus the terminal (handle) identifiers
/// on each side. The proposal becomes an [`Edge`] only if validation accepts
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Connection {
    /// Creates a proposal between two nodes with no handle identifiers.
    #[must_use]
    pub fn between(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }
}

/// A committed directed connection between two nodes' handles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Edge {
    /// Commits an accepted proposal, minting a fresh edge id.
    #[must_use]
    pub fn from_connection(connection: Connection) -> Self {
        Self {
            id: EdgeId::generate(),
            source: connection.source,
            target: connection.target,
            source_handle: connection.source_handle,
            target_handle: connection.target_handle,
        }
    }

    /// Returns `true` if this edge links `source` to `target`.
    #[must_use]
    pub fn links(&self, source: &NodeId, target: &NodeId) -> bool {
        &self.source == source && &self.target == target
    }
}
