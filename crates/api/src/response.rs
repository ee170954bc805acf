//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Acknowledgement body for destructive operations: `{ "message": "..." }`.
///
/// Matches the shape of error bodies so clients read one field either way.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
