//! # HTTP Server Module
//!
//! Wires the item REST API into an Axum server.
//!
//! # Endpoints
//!
//! - `/` - Liveness message
//! - `/health` - Health check including the store
//! - `/items/*` - Item CRUD

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::{ConfigError, ServiceConfig};
pub use server::HttpServer;
