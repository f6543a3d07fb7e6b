//! Item schema types
//!
//! The canonical item shape shared by every layer. The store assigns `id`;
//! everything else comes from a validated [`ItemInput`].

use serde::{Deserialize, Serialize};

/// Server-assigned identity field
pub const FIELD_ID: &str = "id";
/// Required title field
pub const FIELD_TITLE: &str = "title";
/// Optional free-text description
pub const FIELD_DESCRIPTION: &str = "description";
/// Completion flag
pub const FIELD_DONE: &str = "done";

/// Accepted on input in place of `title`
pub const ALIAS_TITLE: &str = "name";
/// Accepted on input in place of `done`
pub const ALIAS_DONE: &str = "completed";

/// A persisted item as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
}

/// A validated write payload.
///
/// Create and update accept the same shape; update replaces every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
}

impl ItemInput {
    /// Input with the given title and all other fields defaulted
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            done: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

/// Offset/limit window for listing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    /// Limit used when the caller does not supply one
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}
