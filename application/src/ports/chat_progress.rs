//! Chat progress port.
//!
//! [`ChatProgressNotifier`] is an **output port** that the presentation
//! layer implements to render a turn while it streams. All methods have
//! default no-op implementations, so implementers only override the
//! callbacks they display.

/// Progress notifier for one streaming chat turn.
pub trait ChatProgressNotifier: Send + Sync {
    /// Called after the user message is accepted, before dispatch.
    fn on_turn_start(&self) {}

    /// Called for each content fragment, in arrival order.
    fn on_content_chunk(&self, _chunk: &str) {}

    /// Called for each reasoning fragment, in arrival order.
    fn on_reasoning_chunk(&self, _chunk: &str) {}

    /// Called once the turn has finalized (real response or error
    /// substitution).
    fn on_turn_end(&self) {}
}

/// No-op implementation for tests and quiet mode.
pub struct NoChatProgress;

impl ChatProgressNotifier for NoChatProgress {}
