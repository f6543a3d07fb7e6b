//! # Item REST API Module
//!
//! Provides HTTP endpoints for CRUD operations on items. Requests are
//! validated by extractors, executed inside a per-request store session and
//! serialized back as JSON.

pub mod errors;
pub mod extract;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;
pub mod state;

pub use errors::{ApiError, ApiResult};
pub use parser::PageLimits;
pub use server::item_routes;
pub use state::{AppState, SharedState};
