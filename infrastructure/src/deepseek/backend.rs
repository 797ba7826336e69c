//! DeepSeek backend gateway.
//!
//! [`DeepseekBackend`] implements the `ChatBackend` port. Dispatching a turn
//! sends one streaming POST to `/v1/chat/completions`; a spawned reader task
//! then folds the SSE body into [`StreamEvent`]s pushed through the turn's
//! channel. The reader exits as soon as the receiving side is dropped, so a
//! torn-down turn can never be mutated by late chunks.

use crate::deepseek::error::{DeepseekError, Result};
use crate::deepseek::prompt_store::PromptStore;
use crate::deepseek::protocol::{ApiRequest, ChatChunk, DONE_SENTINEL, api_error_message};
use crate::deepseek::sse::SseParser;
use async_trait::async_trait;
use deepchat_application::{BackendError, ChatBackend, TurnHandle};
use deepchat_domain::{ChatRequest, FinalPayload, StreamEvent};
use futures::StreamExt;
use reqwest::header;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default reasoning model served by the chat-completions endpoint.
pub const DEFAULT_MODEL: &str = "deepseek-reasoner";

/// Capacity of the per-turn event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Connection settings for [`DeepseekBackend`].
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout in seconds; 0 disables it.
    pub request_timeout_secs: u64,
}

/// HTTP adapter for the DeepSeek chat-completions API.
pub struct DeepseekBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    prompt_store: PromptStore,
}

impl DeepseekBackend {
    pub fn new(settings: BackendSettings, prompt_store: PromptStore) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|_| {
                DeepseekError::InvalidApiKey("key contains invalid header characters".to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if settings.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url,
            model: settings.model,
            prompt_store,
        })
    }
}

#[async_trait]
impl ChatBackend for DeepseekBackend {
    async fn fetch_system_message(&self) -> std::result::Result<String, BackendError> {
        self.prompt_store.load().map_err(Into::into)
    }

    async fn update_system_message(&self, message: &str) -> std::result::Result<(), BackendError> {
        self.prompt_store.store(message).map_err(Into::into)
    }

    async fn send_chat(&self, request: ChatRequest) -> std::result::Result<TurnHandle, BackendError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ApiRequest {
            model: self.model.clone(),
            messages: request.messages,
            temperature: request.temperature,
            stream: true,
        };

        debug!("POST {} (model {})", url, body.model);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::from(DeepseekError::from(e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::from(DeepseekError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            }));
        }

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        tokio::spawn(read_stream(response, tx));
        Ok(TurnHandle::new(rx))
    }
}

/// Running totals of the turn being streamed.
///
/// The terminal event carries these as the authoritative payload, so the
/// consumer never depends on having observed every delta.
#[derive(Debug, Default)]
struct TurnAccumulator {
    content: String,
    reasoning: String,
}

impl TurnAccumulator {
    /// Convert one SSE data payload into push events.
    fn events_for(&mut self, data: &str) -> Vec<StreamEvent> {
        if data == DONE_SENTINEL {
            return vec![self.completed()];
        }

        let chunk: ChatChunk = match serde_json::from_str(data) {
            Ok(chunk) => chunk,
            Err(e) => {
                debug!("Skipping unparseable SSE payload: {}", e);
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        for choice in &chunk.choices {
            if let Some(text) = &choice.delta.reasoning_content
                && !text.is_empty()
            {
                self.reasoning.push_str(text);
                events.push(StreamEvent::ReasoningDelta(text.clone()));
            }
            if let Some(text) = &choice.delta.content
                && !text.is_empty()
            {
                self.content.push_str(text);
                events.push(StreamEvent::ContentDelta(text.clone()));
            }
        }
        events
    }

    /// Terminal event with the accumulated authoritative payload.
    fn completed(&mut self) -> StreamEvent {
        StreamEvent::Completed(Some(FinalPayload {
            content: std::mem::take(&mut self.content),
            reasoning: std::mem::take(&mut self.reasoning),
        }))
    }
}

/// Background reader: folds the SSE body into push events.
async fn read_stream(response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut parser = SseParser::new();
    let mut accumulator = TurnAccumulator::default();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("SSE stream error: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };

        for data in parser.feed(&chunk) {
            for event in accumulator.events_for(&data) {
                let terminal = event.is_terminal();
                if tx.send(event).await.is_err() {
                    // Receiver dropped; the turn was torn down
                    return;
                }
                if terminal {
                    return;
                }
            }
        }
    }

    // Body ended without [DONE]; finalize with what accumulated.
    debug!("SSE body ended without terminal sentinel");
    let _ = tx.send(accumulator.completed()).await;
}
