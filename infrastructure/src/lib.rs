//! Infrastructure layer for deepchat
//!
//! Adapters for the outside world: the DeepSeek HTTP backend, the figment
//! config loader, the file-backed system-prompt store, and the JSONL
//! transcript logger.

pub mod config;
pub mod deepseek;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use deepseek::backend::{BackendSettings, DeepseekBackend};
pub use deepseek::prompt_store::PromptStore;
pub use logging::jsonl_logger::JsonlTranscriptLogger;
