//! Streaming-turn state machine.
//!
//! [`StreamingTurn`] folds the asynchronous fragment stream of one assistant
//! turn into a single finalized [`ConversationEntry`]. The machine owns the
//! buffers that the mutating transitions write through, and finalization
//! reads those same buffers; a captured copy that could go stale and
//! silently truncate the last fragments of a turn never exists.
//!
//! # States
//!
//! - **Idle** — no turn in progress, both buffers empty
//! - **Accumulating** — first delta received, buffers growing
//!
//! A terminal event emits exactly one assistant entry and returns the
//! machine to Idle with cleared buffers. Even an empty turn produces an
//! entry: a submitted user message is never left without a paired response.

use super::stream::{FinalPayload, StreamEvent};
use crate::conversation::entities::ConversationEntry;

/// Phase of the streaming-turn machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    Accumulating,
}

/// Accumulates stream events into a finalized conversation entry.
///
/// Long-lived: one instance is reused across turns and reset at every
/// finalization.
#[derive(Debug, Default)]
pub struct StreamingTurn {
    phase: TurnPhase,
    content: String,
    reasoning: String,
}

impl StreamingTurn {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a turn is accumulating.
    pub fn is_active(&self) -> bool {
        self.phase == TurnPhase::Accumulating
    }

    /// Content accumulated so far, for in-progress rendering.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Reasoning accumulated so far.
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Apply one event.
    ///
    /// Deltas append in arrival order and activate the machine; a terminal
    /// event finalizes the turn and returns the entry to append to the log.
    pub fn apply(&mut self, event: StreamEvent) -> Option<ConversationEntry> {
        match event {
            StreamEvent::ContentDelta(chunk) => {
                self.phase = TurnPhase::Accumulating;
                self.content.push_str(&chunk);
                None
            }
            StreamEvent::ReasoningDelta(chunk) => {
                self.phase = TurnPhase::Accumulating;
                self.reasoning.push_str(&chunk);
                None
            }
            StreamEvent::Completed(payload) => Some(self.finalize(payload)),
            StreamEvent::Error(_) => {
                self.reset();
                Some(ConversationEntry::error_response())
            }
        }
    }

    /// Finalize from whatever has accumulated, without a terminal event.
    ///
    /// Used when the push channel closes mid-turn.
    pub fn flush(&mut self) -> ConversationEntry {
        self.finalize(None)
    }

    /// Finalize from the terminal payload when present, otherwise from the
    /// live buffers. Always resets the machine.
    fn finalize(&mut self, payload: Option<FinalPayload>) -> ConversationEntry {
        let (content, reasoning) = match payload {
            Some(p) => (p.content, p.reasoning),
            None => (
                std::mem::take(&mut self.content),
                std::mem::take(&mut self.reasoning),
            ),
        };
        self.reset();

        if reasoning.is_empty() {
            ConversationEntry::assistant(content)
        } else {
            ConversationEntry::assistant_with_reasoning(content, reasoning)
        }
    }

    fn reset(&mut self) {
        self.phase = TurnPhase::Idle;
        self.content.clear();
        self.reasoning.clear();
    }
}
