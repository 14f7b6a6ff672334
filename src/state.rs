//! Shared application state for request handlers.

use std::sync::Arc;

use crate::store::RecordStore;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the record store behind the [`RecordStore`] trait so tests can swap
/// the JSON file for an in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new<S: RecordStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
