//! Store error types
//!
//! Error codes:
//! - ITEM_NOT_FOUND: referenced id does not exist
//! - ITEM_STORE_UNAVAILABLE: the backing database cannot be reached
//! - ITEM_STORE_ERROR: any other database failure

use sea_orm::DbErr;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item with this id
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// Connection could not be opened or acquired from the pool
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Query or statement failure
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "ITEM_NOT_FOUND",
            StoreError::Unavailable(_) => "ITEM_STORE_UNAVAILABLE",
            StoreError::Database(_) => "ITEM_STORE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => StoreError::Unavailable(err.to_string()),
            other => StoreError::Database(other),
        }
    }
}
