//! HTTP server module.
//!
//! Serves the router over plain HTTP with graceful shutdown on SIGTERM/SIGINT,
//! and builds the static file service for the public directory.

mod server;
mod shutdown;
pub mod static_files;

pub use server::{start_server, ServerError};
