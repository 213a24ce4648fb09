//! End-to-end walkthrough: assemble the three-stage pipeline, run it,
//! deploy the result, and query it from a chat session.
//!
//! Credentials come from the environment (or a `.env` file):
//!
//!     OPENAI_API_KEY=sk-... cargo run --example workflow_demo

use loomboard::chat::ChatSession;
use loomboard::graph::{Connection, Node};
use loomboard::providers::LlmConfig;
use loomboard::types::Position;
use loomboard::workflow::WorkflowState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    loomboard::telemetry::init();

    let config = LlmConfig::from_env();
    let mut workflow = WorkflowState::new();

    let input = workflow.add_node(Node::input(
        "What is the capital of France?",
        Position::new(40.0, 120.0),
    ));
    let llm = workflow.add_node(Node::llm(config, Position::new(280.0, 120.0)));
    let output = workflow.add_node(Node::output(Position::new(520.0, 120.0)));

    workflow.connect(Connection::between(input, llm.clone()))?;
    workflow.connect(Connection::between(llm, output))?;

    workflow.run().await?;
    let result = workflow
        .nodes()
        .iter()
        .find_map(|node| node.output_text())
        .unwrap_or_default()
        .to_string();
    println!("run result: {result}");

    workflow.deploy()?;

    let mut session = ChatSession::new();
    session
        .send("Tell me: what is the capital of France?", &workflow)
        .await;
    for message in &session.active().messages {
        println!("{}: {}", message.role, message.content);
    }

    Ok(())
}
