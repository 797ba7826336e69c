//! Wire types for the DeepSeek chat-completions API.
//!
//! Only the streaming path is modeled: the client always sets
//! `stream: true` and consumes SSE chunks until the `[DONE]` sentinel.
//! Reasoning models put chain-of-thought text in `reasoning_content` and
//! the answer in `content`; both arrive as incremental deltas.

use deepchat_domain::ChatMessage;
use serde::{Deserialize, Serialize};

/// Sentinel data line that ends an SSE response.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Outbound chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub stream: bool,
}

/// One SSE chunk of a streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message fields carried by one chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}

/// Extract a human-readable message from an error response body, falling
/// back to the raw text when it is not the documented JSON shape.
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}
