//! Roster - a small record service.
//!
//! Serves a health check, a static public directory, and two endpoints that
//! read and append name/address records kept in a JSON array file.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{ApiError, StoreError};
pub use routes::create_router;
pub use state::AppState;
