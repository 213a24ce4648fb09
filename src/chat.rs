//! Per-dialog chat sessions layered over the deployment registry.
//!
//! A session holds multiple independently keyed conversations, the active
//! conversation pointer, and a composing flag. Submitting a message appends
//! the user message, consults the workflow's deployed snapshot via
//! [`WorkflowState::answer_query`], and appends the assistant's reply or a
//! generic failure message. The snapshot registry is the only cache a
//! session consults.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::message::Message;
use crate::workflow::WorkflowState;

/// Reply appended when answering a query fails for any reason.
pub const FAILURE_REPLY: &str = "Sorry, there was an error processing your request.";

const DEFAULT_TITLE: &str = "New Conversation";

/// An ordered transcript of messages under one identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
        }
    }
}

/// Session state for the chat panel: keyed conversations, the active
/// pointer, and the composing flag. Lives only for the session; transcripts
/// are never persisted.
///
/// # Examples
///
/// ```
/// use loomboard::chat::ChatSession;
///
/// let mut session = ChatSession::new();
/// assert!(session.active().messages.is_empty());
///
/// let second = session.new_conversation();
/// assert_eq!(session.active().id, second);
/// ```
pub struct ChatSession {
    conversations: FxHashMap<String, Conversation>,
    order: Vec<String>,
    active: String,
    composing: bool,
}

impl ChatSession {
    /// Creates a session with one empty conversation selected.
    #[must_use]
    pub fn new() -> Self {
        let first = Conversation::new("new");
        let active = first.id.clone();
        let mut conversations = FxHashMap::default();
        let order = vec![first.id.clone()];
        conversations.insert(first.id.clone(), first);
        Self {
            conversations,
            order,
            active,
            composing: false,
        }
    }

    /// Starts a fresh conversation and makes it active. Returns its id.
    pub fn new_conversation(&mut self) -> String {
        let conversation = Conversation::new(Uuid::new_v4().to_string());
        let id = conversation.id.clone();
        self.order.push(id.clone());
        self.conversations.insert(id.clone(), conversation);
        self.active = id.clone();
        id
    }

    /// Switches the active pointer. Returns `false` for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if self.conversations.contains_key(id) {
            self.active = id.to_string();
            true
        } else {
            false
        }
    }

    /// The active conversation.
    #[must_use]
    pub fn active(&self) -> &Conversation {
        &self.conversations[&self.active]
    }

    /// All conversations in creation order.
    pub fn conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.order.iter().filter_map(|id| self.conversations.get(id))
    }

    /// Returns `true` while an assistant reply is being composed.
    #[must_use]
    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Submits a user message to the active conversation.
    ///
    /// Appends the user message, sets the composing flag, asks the workflow's
    /// deployment registry for an answer, appends the assistant reply (or
    /// [`FAILURE_REPLY`] when the query fails), and clears the flag.
    pub async fn send(&mut self, content: impl Into<String>, workflow: &WorkflowState) {
        let content = content.into();
        self.push(Message::user(content.clone()));
        self.composing = true;

        let reply = match workflow.answer_query(&content).await {
            Ok(text) => Message::assistant(text),
            Err(err) => {
                tracing::warn!(error = %err, "chat query failed");
                Message::assistant(FAILURE_REPLY)
            }
        };

        self.push(reply);
        self.composing = false;
    }

    fn push(&mut self, message: Message) {
        if let Some(conversation) = self.conversations.get_mut(&self.active) {
            conversation.messages.push(message);
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
