//! Conversation message primitives.
//!
//! Messages carry chat transcripts in [`crate::chat`] and serialize directly
//! into the chat-completion wire format used by
//! [`crate::providers::ChatCompletionProvider`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The sender of a message, as a closed set.
///
/// Serialized forms (`"user"`, `"assistant"`) match the chat-completion API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation.
///
/// # Examples
///
/// ```
/// use loomboard::message::{Message, Role};
///
/// let question = Message::user("What is 2+2?");
/// assert_eq!(question.role, Role::User);
///
/// let answer = Message::assistant("4");
/// assert_eq!(answer.content, "4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message.
    pub role: Role,
    /// The text content.
    pub content: String,
}

impl Message {
    /// Creates a message with the given role and content.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns `true` if this message has the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
