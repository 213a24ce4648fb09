//! Connection validation: the stage-adjacency rules of the pipeline.

use thiserror::Error;

use super::edges::Connection;
use super::node::Node;
use crate::types::NodeKind;

/// A rejected connection proposal.
///
/// This is a validator decision, not an exception: the Display form is the
/// user-facing message for the error slot, and a rejection never mutates the
/// edge collection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Invalid connection. Connect Input → LLM → Output")]
pub struct ConnectionRejected;

/// Decides whether a proposed connection respects the pipeline topology.
///
/// Accepted wirings are exactly `input → llm` and `llm → output`. Proposals
/// originating from an `output` node and proposals naming endpoints that are
/// not in the node set are rejected outright rather than accepted by
/// default, keeping the topology closed.
pub fn validate_connection(nodes: &[Node], connection: &Connection) -> Result<(), ConnectionRejected> {
    let source = nodes.iter().find(|node| node.id == connection.source);
    let target = nodes.iter().find(|node| node.id == connection.target);

    let (Some(source), Some(target)) = (source, target) else {
        tracing::debug!(
            source = %connection.source,
            target = %connection.target,
            "connection rejected: unknown endpoint"
        );
        return Err(ConnectionRejected);
    };

    match (source.kind(), target.kind()) {
        (NodeKind::Input, NodeKind::Llm) | (NodeKind::Llm, NodeKind::Output) => Ok(()),
        (from, to) => {
            tracing::debug!(%from, %to, "connection rejected: stage kinds not adjacent");
            Err(ConnectionRejected)
        }
    }
}
