//! Conversation domain.
//!
//! - [`entities::ConversationEntry`] — one finalized turn in the transcript
//! - [`log::ConversationLog`] — append-only ordered store of entries

pub mod entities;
pub mod log;
