//! # Loomboard: Canvas Workflow Engine
//!
//! Loomboard is the core engine behind a canvas-based pipeline builder: a
//! user drags `input`, `llm`, and `output` nodes onto a canvas, wires them
//! in order, and triggers a single synchronous execution that forwards text
//! through whichever backend the middle node selects (chat completion or
//! web search). A deploy step freezes the last run into a snapshot a chat
//! panel can query.
//!
//! The canvas itself, the per-node form widgets, and the external providers
//! are collaborators behind interfaces; this crate owns the rules: graph
//! topology validation, provider dispatch, the run/deploy/query lifecycle,
//! and chat session state.
//!
//! ## Quick Start
//!
//! ```
//! use loomboard::graph::{Connection, Node};
//! use loomboard::providers::LlmConfig;
//! use loomboard::types::Position;
//! use loomboard::workflow::WorkflowState;
//!
//! let mut workflow = WorkflowState::new();
//!
//! let input = workflow.add_node(Node::input("2+2", Position::new(40.0, 80.0)));
//! let llm = workflow.add_node(Node::llm(
//!     LlmConfig {
//!         api_key: "sk-...".into(),
//!         ..LlmConfig::default()
//!     },
//!     Position::new(240.0, 80.0),
//! ));
//! let output = workflow.add_node(Node::output(Position::new(440.0, 80.0)));
//!
//! // Only adjacent stages connect; anything else is rejected with a
//! // user-facing message in the error slot.
//! workflow.connect(Connection::between(input, llm.clone())).unwrap();
//! workflow.connect(Connection::between(llm, output)).unwrap();
//! assert!(workflow.error().is_none());
//!
//! // workflow.run().await then dispatches against the configured provider
//! // and writes the result into the output node.
//! ```
//!
//! ## Module Guide
//!
//! - [`types`] - Node/edge identifiers, stage kinds, canvas positions
//! - [`message`] - Conversation message primitives
//! - [`graph`] - Node and edge collections plus the connection validator
//! - [`providers`] - Capability-based provider dispatch over HTTP
//! - [`workflow`] - The store, run state machine, and deployment registry
//! - [`chat`] - Chat session state layered over the deployment registry
//! - [`telemetry`] - Tracing subscriber setup

pub mod chat;
pub mod graph;
pub mod message;
pub mod providers;
pub mod telemetry;
pub mod types;
pub mod workflow;
