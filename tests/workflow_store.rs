//! Workflow store lifecycle tests against a recording mock dispatcher:
//! precondition ordering, no-dispatch-on-failure, output writing, error-slot
//! mapping, deploy/undeploy, and snapshot query semantics.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use loomboard::graph::{Connection, Node};
use loomboard::providers::{Dispatcher, LlmConfig, ProviderError};
use loomboard::types::{NodeId, NodeKind, Position};
use loomboard::workflow::{NodeEdit, WorkflowError, WorkflowState};

/// Dispatcher double that records every call and answers from a script.
#[derive(Default)]
struct RecordingDispatcher {
    calls: Mutex<Vec<(String, LlmConfig)>>,
    reply: String,
    fail_with_status: Option<u16>,
}

impl RecordingDispatcher {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            ..Self::default()
        })
    }

    fn failing_with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            fail_with_status: Some(status),
            ..Self::default()
        })
    }

    fn calls(&self) -> Vec<(String, LlmConfig)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn dispatch(&self, query: &str, config: &LlmConfig) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), config.clone()));
        match self.fail_with_status {
            Some(status) => Err(ProviderError::Status {
                provider: "chat completion",
                status,
            }),
            None => Ok(self.reply.clone()),
        }
    }
}

fn test_config() -> LlmConfig {
    LlmConfig {
        api_key: "sk-test".to_string(),
        ..LlmConfig::default()
    }
}

/// Fully wired input → llm → output pipeline carrying the query "2+2".
fn wired_workflow(dispatcher: Arc<RecordingDispatcher>) -> (WorkflowState, NodeId) {
    let mut workflow = WorkflowState::with_dispatcher(dispatcher);
    let input = workflow.add_node(Node::input("2+2", Position::default()));
    let llm = workflow.add_node(Node::llm(test_config(), Position::default()));
    let output = workflow.add_node(Node::output(Position::default()));
    workflow
        .connect(Connection::between(input, llm.clone()))
        .unwrap();
    workflow
        .connect(Connection::between(llm.clone(), output))
        .unwrap();
    (workflow, llm)
}

fn output_text(workflow: &WorkflowState) -> String {
    workflow
        .nodes()
        .iter()
        .find(|node| node.kind() == NodeKind::Output)
        .and_then(|node| node.output_text())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn run_without_core_nodes_fails_before_any_dispatch() {
    let dispatcher = RecordingDispatcher::replying("4");
    let mut workflow = WorkflowState::with_dispatcher(dispatcher.clone());
    workflow.add_node(Node::input("2+2", Position::default()));

    let err = workflow.run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::MissingCoreNodes));
    assert_eq!(
        workflow.error(),
        Some("Please add Input and LLM nodes to the workflow")
    );
    assert!(!workflow.is_running());
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn missing_api_key_is_checked_before_graph_completeness() {
    let dispatcher = RecordingDispatcher::replying("4");
    let mut workflow = WorkflowState::with_dispatcher(dispatcher.clone());
    workflow.add_node(Node::input("2+2", Position::default()));
    workflow.add_node(Node::llm(LlmConfig::default(), Position::default()));
    // No output node either, but the credential check comes first.

    let err = workflow.run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::MissingApiKey));
    assert_eq!(workflow.error(), Some("Please add your API key"));
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn google_without_search_engine_id_fails_before_any_dispatch() {
    let dispatcher = RecordingDispatcher::replying("results");
    let (mut workflow, llm) = wired_workflow(dispatcher.clone());
    workflow
        .apply_edit(&llm, NodeEdit::Model("google".to_string()))
        .unwrap();

    let err = workflow.run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::MissingSearchEngineId));
    assert_eq!(workflow.error(), Some("Please add your Search Engine ID"));
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn blank_input_text_aborts_the_run() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, _) = wired_workflow(dispatcher.clone());
    let input_id = workflow
        .nodes()
        .iter()
        .find(|node| node.kind() == NodeKind::Input)
        .map(|node| node.id.clone())
        .unwrap();
    workflow
        .apply_edit(&input_id, NodeEdit::InputText("   ".to_string()))
        .unwrap();

    let err = workflow.run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::EmptyInput));
    assert_eq!(workflow.error(), Some("Please add some input text"));
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn missing_output_node_is_an_incomplete_workflow() {
    let dispatcher = RecordingDispatcher::replying("4");
    let mut workflow = WorkflowState::with_dispatcher(dispatcher.clone());
    let input = workflow.add_node(Node::input("2+2", Position::default()));
    let llm = workflow.add_node(Node::llm(test_config(), Position::default()));
    workflow.connect(Connection::between(input, llm)).unwrap();

    let err = workflow.run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::IncompleteWorkflow));
    assert_eq!(
        workflow.error(),
        Some("Workflow is incomplete. Add all required nodes.")
    );
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn unconnected_nodes_fail_with_the_wiring_message() {
    let dispatcher = RecordingDispatcher::replying("4");
    let mut workflow = WorkflowState::with_dispatcher(dispatcher.clone());
    workflow.add_node(Node::input("2+2", Position::default()));
    workflow.add_node(Node::llm(test_config(), Position::default()));
    workflow.add_node(Node::output(Position::default()));

    let err = workflow.run().await.unwrap_err();

    assert!(matches!(err, WorkflowError::NodesNotConnected));
    assert_eq!(
        workflow.error(),
        Some("Please connect the nodes in order: Input → LLM → Output")
    );
    assert!(dispatcher.calls().is_empty());
}

#[tokio::test]
async fn successful_run_writes_the_output_node_and_clears_the_error() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, _) = wired_workflow(dispatcher.clone());
    workflow.set_error(Some("stale".to_string()));

    workflow.run().await.unwrap();

    assert_eq!(output_text(&workflow), "4");
    assert!(workflow.error().is_none());
    assert!(!workflow.is_running());

    let calls = dispatcher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "2+2");
    assert_eq!(calls[0].1.model, "gpt-3.5");
}

#[tokio::test]
async fn dispatch_failures_map_statuses_and_leave_the_workflow_idle() {
    let cases = [
        (401u16, "Invalid API key. Please check your API key and try again."),
        (429, "Rate limit exceeded. Please wait a moment and try again."),
        (500, "API service error. Please try again later."),
    ];

    for (status, expected) in cases {
        let dispatcher = RecordingDispatcher::failing_with_status(status);
        let (mut workflow, _) = wired_workflow(dispatcher);

        let err = workflow.run().await.unwrap_err();

        assert!(matches!(err, WorkflowError::Provider(_)));
        assert_eq!(workflow.error(), Some(expected));
        assert!(!workflow.is_running());
        assert_eq!(output_text(&workflow), "");
    }
}

#[tokio::test]
async fn deploy_requires_a_successful_run_first() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, _) = wired_workflow(dispatcher);

    let err = workflow.deploy().unwrap_err();

    assert!(matches!(err, WorkflowError::DeployBeforeRun));
    assert_eq!(
        workflow.error(),
        Some("Please run the workflow before deploying")
    );
    assert!(workflow.deployed().is_none());
}

#[tokio::test]
async fn deployed_snapshot_answers_matching_queries_without_dispatching() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, _) = wired_workflow(dispatcher.clone());
    workflow.run().await.unwrap();
    workflow.deploy().unwrap();

    // Case-insensitive containment of the captured input is a cache hit.
    let answer = workflow.answer_query("What is 2+2?").await.unwrap();

    assert_eq!(answer, "4");
    assert_eq!(dispatcher.calls().len(), 1, "no dispatch beyond the run");
}

#[tokio::test]
async fn snapshot_misses_dispatch_against_the_frozen_config() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, llm) = wired_workflow(dispatcher.clone());
    workflow.run().await.unwrap();
    workflow.deploy().unwrap();

    // Mutating the live node after deploy must not affect snapshot queries.
    workflow
        .apply_edit(&llm, NodeEdit::ApiKey("sk-rotated".to_string()))
        .unwrap();

    let answer = workflow.answer_query("capital of France").await.unwrap();

    assert_eq!(answer, "4");
    let calls = dispatcher.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "capital of France");
    assert_eq!(calls[1].1.api_key, "sk-test", "frozen config, not live");
}

#[tokio::test]
async fn answer_query_without_a_snapshot_fails() {
    let workflow = WorkflowState::new();
    let err = workflow.answer_query("anything").await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotDeployed));
    assert_eq!(err.user_message(), "No deployed workflow available");
}

#[tokio::test]
async fn undeploy_drops_only_the_snapshot() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, _) = wired_workflow(dispatcher);
    workflow.run().await.unwrap();
    workflow.deploy().unwrap();

    workflow.undeploy();

    assert!(workflow.deployed().is_none());
    assert_eq!(workflow.nodes().len(), 3, "graph untouched");
    assert_eq!(output_text(&workflow), "4");
}

#[tokio::test]
async fn reset_clears_graph_error_and_snapshot() {
    let dispatcher = RecordingDispatcher::replying("4");
    let (mut workflow, _) = wired_workflow(dispatcher);
    workflow.run().await.unwrap();
    workflow.deploy().unwrap();

    workflow.reset();

    assert!(workflow.nodes().is_empty());
    assert!(workflow.edges().is_empty());
    assert!(workflow.error().is_none());
    assert!(workflow.deployed().is_none());

    // A fresh deploy is impossible until a new run completes.
    let err = workflow.deploy().unwrap_err();
    assert!(matches!(err, WorkflowError::DeployIncomplete));
    assert_eq!(workflow.error(), Some("Cannot deploy incomplete workflow"));
}

#[tokio::test]
async fn rejected_connections_set_the_error_slot_and_accepts_clear_it() {
    let mut workflow = WorkflowState::new();
    let input = workflow.add_node(Node::input("2+2", Position::default()));
    let llm = workflow.add_node(Node::llm(test_config(), Position::default()));
    let output = workflow.add_node(Node::output(Position::default()));

    assert!(workflow
        .connect(Connection::between(input.clone(), output))
        .is_err());
    assert_eq!(
        workflow.error(),
        Some("Invalid connection. Connect Input → LLM → Output")
    );
    assert!(workflow.edges().is_empty());

    workflow.connect(Connection::between(input, llm)).unwrap();
    assert!(workflow.error().is_none());
    assert_eq!(workflow.edges().len(), 1);
}

#[test]
fn edits_address_nodes_by_id_and_reject_mismatched_fields() {
    let mut workflow = WorkflowState::new();
    let input = workflow.add_node(Node::input("", Position::default()));
    let llm = workflow.add_node(Node::llm(LlmConfig::default(), Position::default()));

    workflow
        .apply_edit(&input, NodeEdit::InputText("2+2".to_string()))
        .unwrap();
    workflow
        .apply_edit(&llm, NodeEdit::MaxTokens(Some(512)))
        .unwrap();
    workflow
        .apply_edit(&llm, NodeEdit::Temperature(Some(0.9)))
        .unwrap();

    let err = workflow
        .apply_edit(&input, NodeEdit::ApiKey("sk-test".to_string()))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::EditMismatch { .. }));

    let err = workflow
        .apply_edit(&NodeId::from("ghost"), NodeEdit::InputText("x".to_string()))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownNode { .. }));
}

#[tokio::test]
async fn extra_nodes_are_tolerated_and_the_first_of_each_kind_runs() {
    let dispatcher = RecordingDispatcher::replying("first");
    let (mut workflow, _) = wired_workflow(dispatcher.clone());
    // A second input node is ignored by the runner.
    workflow.add_node(Node::input("ignored", Position::default()));

    workflow.run().await.unwrap();

    let calls = dispatcher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "2+2");
}
