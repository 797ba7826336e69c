//! Domain layer for deepchat
//!
//! This crate contains the core entities and state machines of the chat
//! client. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation Log
//!
//! An append-only ordered sequence of finalized turns. Entries are immutable
//! once appended; the log is never reordered and never persisted.
//!
//! ## Streaming Turn
//!
//! One assistant response arrives as an arbitrary interleaving of content and
//! reasoning fragments followed by a single terminal event. [`StreamingTurn`]
//! is the two-state machine (Idle / Accumulating) that folds those events
//! into exactly one finalized [`ConversationEntry`].

pub mod conversation;
pub mod core;
pub mod preset;
pub mod session;

// Re-export commonly used types
pub use conversation::{
    entities::{ConversationEntry, ERROR_RESPONSE, Role},
    log::ConversationLog,
};
pub use crate::core::error::DomainError;
pub use preset::UseCase;
pub use session::{
    request::{ChatMessage, ChatRequest},
    stream::{FinalPayload, StreamEvent},
    turn::{StreamingTurn, TurnPhase},
};
