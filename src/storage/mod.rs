//! Item persistence
//!
//! A single relational table behind a sea-orm connection pool.
//!
//! # Design Principles
//!
//! - One explicitly constructed store handle, no global state
//! - One session (transaction) per request, released on every exit path
//! - Single-row operations, relying on the database for atomicity
//! - Ids are never reused after deletion

mod errors;
pub mod item;
mod repository;
mod session;
mod store;

pub use errors::{StoreError, StoreResult};
pub use repository::ItemRepository;
pub use session::StoreSession;
pub use store::ItemStore;
