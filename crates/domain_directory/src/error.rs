//! Directory domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the directory domain
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(PortError),
}

impl From<PortError> for DirectoryError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { .. } => DirectoryError::NotFound(error.to_string()),
            PortError::Validation { .. } => DirectoryError::Validation(error.to_string()),
            PortError::Conflict { .. } => DirectoryError::Conflict(error.to_string()),
            other => DirectoryError::Storage(other),
        }
    }
}
