//! # Response Formatting
//!
//! Acknowledgment bodies. Items themselves are returned as bare JSON objects
//! and lists as bare arrays.

use serde::Serialize;

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Acknowledgment returned by delete
    pub fn deleted() -> Self {
        Self::new("Item deleted successfully")
    }
}
