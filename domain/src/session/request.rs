//! Outbound chat request assembly.

use crate::conversation::log::ConversationLog;
use serde::{Deserialize, Serialize};

/// A single message on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// The exact request dispatched to the backend for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl ChatRequest {
    /// Build the ordered message list for one turn:
    /// `[system, ...log entries in order]`.
    ///
    /// The caller appends the new user entry to the log *before* assembling,
    /// so the request always reflects the history at the moment of
    /// submission, never an earlier snapshot missing the message being
    /// sent. Reasoning text is never echoed back to the backend.
    pub fn assemble(system_prompt: &str, log: &ConversationLog, temperature: f32) -> Self {
        let mut messages = Vec::with_capacity(log.len() + 1);
        messages.push(ChatMessage::new("system", system_prompt));
        for entry in log.entries() {
            messages.push(ChatMessage::new(entry.role.as_str(), entry.content.clone()));
        }
        Self {
            messages,
            temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::ConversationEntry;

    #[test]
    fn assembles_system_history_and_user_in_order() {
        let mut log = ConversationLog::new();
        log.append(ConversationEntry::user("A"));
        log.append(ConversationEntry::assistant("B"));
        log.append(ConversationEntry::user("C"));

        let request = ChatRequest::assemble("S", &log, 1.3);

        let expected = vec![
            ChatMessage::new("system", "S"),
            ChatMessage::new("user", "A"),
            ChatMessage::new("assistant", "B"),
            ChatMessage::new("user", "C"),
        ];
        assert_eq!(request.messages, expected);
        assert_eq!(request.temperature, 1.3);
    }

    #[test]
    fn reasoning_is_not_echoed_into_requests() {
        let mut log = ConversationLog::new();
        log.append(ConversationEntry::user("question"));
        log.append(ConversationEntry::assistant_with_reasoning("answer", "secret thoughts"));
        log.append(ConversationEntry::user("follow-up"));

        let request = ChatRequest::assemble("", &log, 0.0);

        assert_eq!(request.messages[2].content, "answer");
        assert!(
            request
                .messages
                .iter()
                .all(|m| !m.content.contains("secret thoughts"))
        );
    }

    #[test]
    fn empty_log_yields_system_message_only() {
        let log = ConversationLog::new();
        let request = ChatRequest::assemble("S", &log, 1.0);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "system");
    }
}
