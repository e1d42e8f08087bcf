//! Error types for the Vehicle actor.

use thiserror::Error;

/// Errors that can occur during vehicle registry operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VehicleError {
    /// The requested vehicle was not found.
    #[error("Vehicle not found: {0}")]
    NotFound(String),

    /// The vehicle data provided is invalid.
    #[error("Vehicle validation error: {0}")]
    Validation(String),

    /// No user owns the registry, so it cannot be changed.
    #[error("No user is signed in")]
    NotSignedIn,

    /// Reading or writing the registry failed.
    #[error("Vehicle storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for VehicleError {
    fn from(msg: String) -> Self {
        VehicleError::ActorCommunicationError(msg)
    }
}
