//! Error types for the Identity actor.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during sign-in and profile operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    /// The mobile number is malformed.
    #[error("Invalid mobile number: {0}")]
    InvalidPhone(String),

    /// The one-time code was not accepted.
    #[error("Invalid OTP")]
    InvalidCode,

    /// The operation needs a signed-in user.
    #[error("No user is signed in")]
    NotAuthenticated,

    /// The profile data provided is invalid.
    #[error("Profile validation error: {0}")]
    Validation(String),

    /// Reading or writing the session or a profile failed.
    #[error("Identity storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for IdentityError {
    fn from(msg: String) -> Self {
        IdentityError::ActorCommunicationError(msg)
    }
}

impl From<StorageError> for IdentityError {
    fn from(e: StorageError) -> Self {
        IdentityError::Storage(e.to_string())
    }
}
