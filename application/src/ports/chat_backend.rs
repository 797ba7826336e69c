//! Chat backend port.
//!
//! Defines how the application layer talks to the model backend. The
//! outbound call only dispatches a turn; the response itself arrives on a
//! separate push channel scoped to that turn, represented by [`TurnHandle`].

use async_trait::async_trait;
use deepchat_domain::{ChatRequest, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Handle for receiving the push events of one in-flight turn.
///
/// Wraps the receiving half of the turn's event channel. The subscription is
/// scoped to the handle: dropping it tears the listener down, the backend's
/// sends start failing, and late events can never mutate discarded state.
pub struct TurnHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl TurnHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, or `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Drain the stream into the final `(content, reasoning)` pair.
    ///
    /// Useful when the caller wants streaming at the transport level but
    /// only needs the end result.
    pub async fn collect(mut self) -> Result<(String, String), BackendError> {
        let mut content = String::new();
        let mut reasoning = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::ContentDelta(chunk) => content.push_str(&chunk),
                StreamEvent::ReasoningDelta(chunk) => reasoning.push_str(&chunk),
                StreamEvent::Completed(Some(payload)) => {
                    return Ok((payload.content, payload.reasoning));
                }
                StreamEvent::Completed(None) => return Ok((content, reasoning)),
                StreamEvent::Error(e) => return Err(BackendError::RequestFailed(e)),
            }
        }
        // Channel closed without a terminal event — return what we have
        Ok((content, reasoning))
    }
}

/// Gateway to the model backend.
///
/// This port defines how the application layer communicates with the model
/// provider. The implementation (adapter) lives in the infrastructure layer.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fetch the persisted system message. Called once at startup.
    async fn fetch_system_message(&self) -> Result<String, BackendError>;

    /// Persist an edited system message.
    async fn update_system_message(&self, message: &str) -> Result<(), BackendError>;

    /// Dispatch one chat turn. Returns the push channel for its events.
    async fn send_chat(&self, request: ChatRequest) -> Result<TurnHandle, BackendError>;
}
