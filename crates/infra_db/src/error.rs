//! Database error types

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored value could not be mapped to its domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for an entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{entity} with id '{id}' not found"))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }
}

/// Maps database failures onto the unified port error the domain sees
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => PortError::not_found("record", message),
            DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
            DatabaseError::ForeignKeyViolation(message)
            | DatabaseError::ConstraintViolation(message) => PortError::conflict(message),
            DatabaseError::CorruptRow(message) => PortError::validation(message),
            DatabaseError::ConnectionFailed(message) => PortError::connection(message),
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

/// Classifies SQLx errors by PostgreSQL error code
pub fn classify(error: sqlx::Error) -> DatabaseError {
    match &error {
        sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
        sqlx::Error::Database(db_err) => {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => return DatabaseError::DuplicateEntry(db_err.message().to_string()),
                    "23503" => {
                        return DatabaseError::ForeignKeyViolation(db_err.message().to_string())
                    }
                    "23514" => {
                        return DatabaseError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => {}
                }
            }
            DatabaseError::QueryFailed(db_err.message().to_string())
        }
        _ => DatabaseError::SqlError(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let error = DatabaseError::not_found("Claim", "CLM-123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("CLM-123"));
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let port_error: PortError =
            DatabaseError::DuplicateEntry("username taken".to_string()).into();
        assert!(port_error.is_conflict());
    }
}
