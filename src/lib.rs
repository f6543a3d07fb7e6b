//! itemstore - a small record-keeping HTTP service for to-do items
//!
//! Layers, outermost first:
//! - `cli`: argument parsing and boot sequence
//! - `http_server`: configuration, CORS, tracing and graceful shutdown
//! - `rest_api`: routes, extractors, handlers and error responses
//! - `schema`: the item shape and payload validation
//! - `storage`: the sea-orm backed items table

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod schema;
pub mod storage;
