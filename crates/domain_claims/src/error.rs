//! Claim domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claim lifecycle
///
/// All four workflow variants are recoverable at the request boundary:
/// they surface as a user-visible message, never a crash.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Bad input: hours out of range, missing required field
    #[error("Validation error: {0}")]
    Validation(String),

    /// The actor lacks the role or ownership for the action
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// A transition was attempted from a state that does not permit it
    #[error("Cannot {action} a claim in state '{status}'")]
    InvalidState { action: String, status: String },

    /// The referenced claim does not exist
    #[error("Claim not found: {0}")]
    NotFound(String),

    /// The persistence or blob layer failed
    #[error("Storage error: {0}")]
    Storage(PortError),
}

impl ClaimError {
    pub fn invalid_state(action: impl Into<String>, status: impl ToString) -> Self {
        ClaimError::InvalidState {
            action: action.into(),
            status: status.to_string(),
        }
    }
}

impl From<PortError> for ClaimError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { .. } => ClaimError::NotFound(error.to_string()),
            PortError::Validation { .. } => ClaimError::Validation(error.to_string()),
            other => ClaimError::Storage(other),
        }
    }
}
