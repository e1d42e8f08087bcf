//! Error types for the Order actor.

use super::fsm::FsmError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The draft lacks fields an order needs; names them in camelCase.
    #[error("Order draft is incomplete, missing: {}", .0.join(", "))]
    IncompleteDraft(Vec<&'static str>),

    /// No user owns the order history.
    #[error("No user is signed in")]
    NotSignedIn,

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The delivery state machine does not accept the event in the current status.
    #[error("Invalid order transition: {0}")]
    InvalidTransition(String),

    /// The draft or feedback data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// Reading or writing the order history failed.
    #[error("Order storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<StorageError> for OrderError {
    fn from(e: StorageError) -> Self {
        OrderError::Storage(e.to_string())
    }
}

impl From<FsmError> for OrderError {
    fn from(e: FsmError) -> Self {
        OrderError::InvalidTransition(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_draft_names_every_missing_field() {
        let e = OrderError::IncompleteDraft(vec!["vehicleId", "fuelType"]);
        assert_eq!(
            e.to_string(),
            "Order draft is incomplete, missing: vehicleId, fuelType"
        );
    }

    #[test]
    fn storage_failures_keep_the_backend_message() {
        let e = OrderError::from(StorageError::Backend("orders_1: disk full".into()));
        assert_eq!(
            e,
            OrderError::Storage("Backend error: orders_1: disk full".into())
        );
        assert_eq!(
            OrderError::from("channel closed".to_string()),
            OrderError::ActorCommunicationError("channel closed".into())
        );
    }
}
