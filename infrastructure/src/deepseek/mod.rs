//! DeepSeek HTTP adapter.
//!
//! Implements the [`ChatBackend`](deepchat_application::ChatBackend) port
//! against the DeepSeek chat-completions API. Each turn goes out as one
//! streaming POST; a background task folds the SSE response body into the
//! push events consumed by the application layer.

pub mod backend;
pub mod error;
pub mod prompt_store;
pub mod protocol;
pub mod sse;
