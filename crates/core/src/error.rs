//! Domain error taxonomy shared by the db and api crates.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup failed to resolve. `key` is whatever the caller searched
    /// by (an id rendered to a string, or an email).
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by a database id.
    pub fn not_found_id(entity: &'static str, id: crate::types::DbId) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }

    /// Shorthand for a [`CoreError::NotFound`] keyed by an email address.
    pub fn not_found_email(entity: &'static str, email: &str) -> Self {
        CoreError::NotFound {
            entity,
            key: email.to_string(),
        }
    }
}
