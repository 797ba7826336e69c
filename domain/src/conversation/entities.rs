//! Conversation entities

use serde::{Deserialize, Serialize};

/// Role of a finalized conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire-format name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Fixed response text substituted when a chat turn fails outright.
pub const ERROR_RESPONSE: &str = "Error processing request";

/// A finalized turn in the conversation (Entity)
///
/// Immutable once appended to the [`ConversationLog`](super::log::ConversationLog):
/// construction is the only mutation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    /// Auxiliary reasoning output; only assistant entries carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            reasoning: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            reasoning: None,
        }
    }

    pub fn assistant_with_reasoning(
        content: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            reasoning: Some(reasoning.into()),
        }
    }

    /// Synthetic assistant entry appended when a turn fails, so every user
    /// message keeps a paired response.
    pub fn error_response() -> Self {
        Self::assistant(ERROR_RESPONSE)
    }

    pub fn has_reasoning(&self) -> bool {
        self.reasoning.is_some()
    }
}
