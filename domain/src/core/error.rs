//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message is empty")]
    EmptyInput,

    #[error("A turn is already in flight")]
    TurnInFlight,

    #[error("Unknown use case: {0}")]
    UnknownUseCase(String),
}
