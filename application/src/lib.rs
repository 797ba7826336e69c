//! Application layer for deepchat
//!
//! Use cases and ports. This crate orchestrates the domain model and depends
//! only on the domain layer; infrastructure adapters implement the ports.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::chat_backend::{BackendError, ChatBackend, TurnHandle};
pub use ports::chat_progress::{ChatProgressNotifier, NoChatProgress};
pub use ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
pub use use_cases::chat_controller::ChatController;
