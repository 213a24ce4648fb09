//! The workflow store: graph ownership, the run state machine, and the
//! user-visible error slot.

use std::sync::Arc;

use crate::graph::{Connection, ConnectionRejected, Edge, Node, NodePayload, WorkflowGraph};
use crate::providers::{Dispatcher, HttpDispatcher, LlmConfig};
use crate::types::{EdgeId, NodeId, NodeKind, Position};

use super::deploy::DeployedSnapshot;
use super::edits::NodeEdit;
use super::error::WorkflowError;

/// Lifecycle state of the single workflow instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
}

/// Explicit, constructible workflow state owned by the composition root.
///
/// Holds the graph, the run status, the single replaceable error slot, and
/// the deployed snapshot. All mutation goes through this type's operations;
/// observers read whole collections between operations. Exclusive access
/// (`&mut self`) on [`run`](Self::run) is the concurrency model: there is
/// never more than one outstanding run.
///
/// # Examples
///
/// ```
/// use loomboard::graph::{Connection, Node};
/// use loomboard::providers::LlmConfig;
/// use loomboard::types::Position;
/// use loomboard::workflow::WorkflowState;
///
/// let mut workflow = WorkflowState::new();
/// let input = workflow.add_node(Node::input("2+2", Position::default()));
/// let llm = workflow.add_node(Node::llm(LlmConfig::default(), Position::default()));
///
/// workflow
///     .connect(Connection::between(input, llm))
///     .expect("input → llm is a valid wiring");
/// assert!(workflow.error().is_none());
/// ```
pub struct WorkflowState {
    pub(super) graph: WorkflowGraph,
    pub(super) error: Option<String>,
    pub(super) status: RunStatus,
    pub(super) deployed: Option<DeployedSnapshot>,
    pub(super) dispatcher: Arc<dyn Dispatcher>,
}

impl WorkflowState {
    /// Creates a workflow backed by the production HTTP dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Arc::new(HttpDispatcher::new()))
    }

    /// Creates a workflow backed by the given dispatcher.
    #[must_use]
    pub fn with_dispatcher(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            graph: WorkflowGraph::new(),
            error: None,
            status: RunStatus::Idle,
            deployed: None,
            dispatcher,
        }
    }

    /// Nodes for rendering.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    /// Edges for rendering.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    /// Current content of the user-visible error slot.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the error slot. The UI layer uses this for messages of its
    /// own; lifecycle operations manage the slot themselves.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Returns `true` while a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Appends a node, returning its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.graph.add_node(node)
    }

    /// Creates a node of the given kind at a canvas position, the operation
    /// behind a drop event. Input and output nodes start empty; llm nodes
    /// start with the default configuration.
    pub fn add_node_of_kind(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let node = match kind {
            NodeKind::Input => Node::input("", position),
            NodeKind::Llm => Node::llm(LlmConfig::default(), position),
            NodeKind::Output => Node::output(position),
        };
        self.add_node(node)
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        self.graph.remove_node(id)
    }

    /// Updates a node's canvas position.
    pub fn move_node(&mut self, id: &NodeId, position: Position) {
        self.graph.move_node(id, position);
    }

    /// Removes an edge by id.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        self.graph.remove_edge(id)
    }

    /// Validates and commits a connection proposal.
    ///
    /// Acceptance appends the edge and clears the error slot; rejection
    /// leaves the edge collection unchanged and places the rejection message
    /// in the slot.
    pub fn connect(&mut self, connection: Connection) -> Result<EdgeId, ConnectionRejected> {
        match self.graph.connect(connection) {
            Ok(id) => {
                self.error = None;
                Ok(id)
            }
            Err(rejected) => {
                self.error = Some(rejected.to_string());
                Err(rejected)
            }
        }
    }

    /// Applies a field edit to the addressed node.
    pub fn apply_edit(&mut self, id: &NodeId, edit: NodeEdit) -> Result<(), WorkflowError> {
        let node = self
            .graph
            .node_mut(id)
            .ok_or_else(|| WorkflowError::UnknownNode { id: id.clone() })?;

        match (&mut node.payload, edit) {
            (NodePayload::Input { text }, NodeEdit::InputText(value)) => *text = value,
            (NodePayload::Llm(config), NodeEdit::Model(value)) => config.model = value,
            (NodePayload::Llm(config), NodeEdit::ApiKey(value)) => config.api_key = value,
            (NodePayload::Llm(config), NodeEdit::MaxTokens(value)) => config.max_tokens = value,
            (NodePayload::Llm(config), NodeEdit::Temperature(value)) => {
                config.temperature = value
            }
            (NodePayload::Llm(config), NodeEdit::SearchEngineId(value)) => {
                config.search_engine_id = value
            }
            (NodePayload::Llm(config), NodeEdit::SerpApiKey(value)) => {
                config.serp_api_key = value
            }
            (_, edit) => {
                return Err(WorkflowError::EditMismatch {
                    id: id.clone(),
                    field: edit.field_name(),
                })
            }
        }
        Ok(())
    }

    /// Executes the pipeline once, synchronously from the caller's view.
    ///
    /// Transitions to `Running`, checks the preconditions in order (each
    /// aborting before any network call), dispatches, and writes the result
    /// into the output node. The transition back to `Idle` is guaranteed on
    /// every outcome; a failure additionally records its mapped message in
    /// the error slot and re-surfaces the error to the caller.
    pub async fn run(&mut self) -> Result<(), WorkflowError> {
        self.status = RunStatus::Running;
        self.error = None;
        tracing::info!("workflow run started");

        let outcome = self.execute().await;
        self.status = RunStatus::Idle;

        match outcome {
            Ok(text) => {
                if let Some(node) = self.graph.first_of_kind_mut(NodeKind::Output) {
                    if let NodePayload::Output { text: slot } = &mut node.payload {
                        *slot = text;
                    }
                }
                self.error = None;
                tracing::info!("workflow run completed");
                Ok(())
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(error = %message, "workflow run failed");
                self.error = Some(message);
                Err(err)
            }
        }
    }

    async fn execute(&self) -> Result<String, WorkflowError> {
        let input = self.graph.first_of_kind(NodeKind::Input);
        let llm = self.graph.first_of_kind(NodeKind::Llm);
        let (Some(input), Some(llm)) = (input, llm) else {
            return Err(WorkflowError::MissingCoreNodes);
        };
        let config = llm.llm_config().ok_or(WorkflowError::MissingCoreNodes)?;

        if !config.has_api_key() {
            return Err(WorkflowError::MissingApiKey);
        }
        if config.model == "google" && !config.has_search_engine_id() {
            return Err(WorkflowError::MissingSearchEngineId);
        }

        let query = input.input_text().unwrap_or_default().trim();
        if query.is_empty() {
            return Err(WorkflowError::EmptyInput);
        }

        let output = self
            .graph
            .first_of_kind(NodeKind::Output)
            .ok_or(WorkflowError::IncompleteWorkflow)?;
        if !self.graph.has_edge_between(&input.id, &llm.id)
            || !self.graph.has_edge_between(&llm.id, &output.id)
        {
            return Err(WorkflowError::NodesNotConnected);
        }

        let text = self.dispatcher.dispatch(query, config).await?;
        Ok(text)
    }

    /// Clears nodes, edges, the error slot, and any deployed snapshot.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.error = None;
        self.deployed = None;
        tracing::info!("workflow reset");
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}
