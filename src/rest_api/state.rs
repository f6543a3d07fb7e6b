//! Shared application state

use std::sync::Arc;

use crate::storage::ItemStore;

use super::parser::PageLimits;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ItemStore,
    pub limits: PageLimits,
}

impl AppState {
    pub fn new(store: ItemStore, limits: PageLimits) -> Self {
        Self { store, limits }
    }
}

/// Shared state type
pub type SharedState = Arc<AppState>;
