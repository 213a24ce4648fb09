//! Workflow graph: node and edge collections plus the connection rules.
//!
//! [`WorkflowGraph`] owns both collections and exposes the structural
//! operations the canvas layer drives: add/remove/move nodes, remove edges,
//! and [`connect`](WorkflowGraph::connect), which validates a proposal and
//! appends the edge in the same accept path. Collection order carries no
//! meaning; where a run needs "the" node of a stage it takes the first found
//! of that kind.

mod edges;
mod node;
mod validator;


pub use edges::{Connection, Edge};
pub use node::{Node, NodePayload};
pub use validator::{validate_connection, ConnectionRejected};

use serde::{Deserialize, Serialize};

use crate::types::{EdgeId, NodeId, NodeKind, Position};

/// The node and edge collections held together.
///
/// Extra nodes of a kind are tolerated; execution only recognizes the first
/// found of each kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl WorkflowGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All nodes, for rendering.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, for rendering.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Appends a node to the collection, returning its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        tracing::debug!(id = %node.id, kind = %node.kind(), "node added");
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Removes a node and every edge touching it. Returns the removed node,
    /// if it existed.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|node| &node.id == id)?;
        self.edges
            .retain(|edge| &edge.source != id && &edge.target != id);
        let removed = self.nodes.remove(index);
        tracing::debug!(id = %removed.id, "node removed");
        Some(removed)
    }

    /// Updates a node's canvas position. Unknown ids are ignored.
    pub fn move_node(&mut self, id: &NodeId, position: Position) {
        if let Some(node) = self.nodes.iter_mut().find(|node| &node.id == id) {
            node.position = position;
        }
    }

    /// Removes an edge by id. Returns the removed edge, if it existed.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| &edge.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Validates a connection proposal and, on acceptance, appends the edge
    /// and returns its id.
    ///
    /// Rejection leaves the edge collection untouched.
    pub fn connect(&mut self, connection: Connection) -> Result<EdgeId, ConnectionRejected> {
        validate_connection(&self.nodes, &connection)?;
        let edge = Edge::from_connection(connection);
        tracing::debug!(source = %edge.source, target = %edge.target, "edge accepted");
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    /// First node of the given kind, the one execution recognizes.
    #[must_use]
    pub fn first_of_kind(&self, kind: NodeKind) -> Option<&Node> {
        self.nodes.iter().find(|node| node.kind() == kind)
    }

    /// Mutable access to the first node of the given kind.
    pub fn first_of_kind_mut(&mut self, kind: NodeKind) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.kind() == kind)
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Mutable lookup of a node by id.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| &node.id == id)
    }

    /// Returns `true` if an edge from `source` to `target` exists.
    #[must_use]
    pub fn has_edge_between(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges.iter().any(|edge| edge.links(source, target))
    }

    /// Drops every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
