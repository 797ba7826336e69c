//! Streaming events for an in-flight chat turn.
//!
//! [`StreamEvent`] represents individual push notifications emitted by the
//! backend while a response is being generated. Content and reasoning arrive
//! as raw text deltas on two logical channels; within a channel, deltas must
//! be applied strictly in arrival order. A single terminal event ends the
//! turn.

use serde::{Deserialize, Serialize};

/// Authoritative final strings carried by a terminal event.
///
/// When present, finalization uses these instead of the accumulated buffers
/// (event-payload finality).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalPayload {
    pub content: String,
    #[serde(default)]
    pub reasoning: String,
}

/// An event in a streaming chat response.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A chunk of answer text.
    ContentDelta(String),
    /// A chunk of auxiliary reasoning text.
    ReasoningDelta(String),
    /// The turn finished; an attached payload is authoritative.
    Completed(Option<FinalPayload>),
    /// The turn failed mid-stream.
    Error(String),
}

impl StreamEvent {
    /// Returns the delta text if this is a content or reasoning chunk.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::ContentDelta(s) | StreamEvent::ReasoningDelta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event ends the turn.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
