//! In-flight turn domain.
//!
//! - [`stream::StreamEvent`] — push-channel events of a streaming response
//! - [`turn::StreamingTurn`] — folds events into a finalized entry
//! - [`request::ChatRequest`] — outbound request assembly

pub mod request;
pub mod stream;
pub mod turn;
