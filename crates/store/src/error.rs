//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by entity validation and persistence
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field failed validation
    #[error("invalid {entity} {field}: {message}")]
    Validation {
        /// Entity name (e.g., "country")
        entity: &'static str,
        /// Field name
        field: &'static str,
        /// What was wrong
        message: String,
    },

    /// Update targeted a row that does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Primary key that was looked up
        id: i64,
    },

    /// Database could not be opened
    #[error("failed to open database '{path}': {message}")]
    Open {
        /// Database path
        path: String,
        /// Underlying error message
        message: String,
    },

    /// Underlying database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a Validation error
    pub fn validation(
        entity: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            entity,
            field,
            message: message.into(),
        }
    }
}

/// Trim a required text field, rejecting blank values
pub(crate) fn require_text(entity: &'static str, field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(entity, field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Reject ids that are not positive
pub(crate) fn require_id(entity: &'static str, field: &'static str, id: i64) -> Result<i64> {
    if id <= 0 {
        return Err(StoreError::validation(
            entity,
            field,
            format!("must be a positive id, got {}", id),
        ));
    }
    Ok(id)
}

/// Normalize an optional middle initial to one upper-case character
pub(crate) fn middle_initial(entity: &'static str, value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(initial) if initial.chars().count() == 1 => Ok(Some(initial.to_uppercase())),
        Some(_) => Err(StoreError::validation(
            entity,
            "middle_initial",
            "must be a single character",
        )),
    }
}
