//! In-memory backend, used in tests in place of the JSON file.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{push_record, NewRecord, Record, RecordStore};
use crate::error::StoreError;

/// Record store held in memory. Can be switched into a failing mode to
/// simulate an unreadable backing file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Value>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
            failing: AtomicBool::new(false),
        }
    }

    /// When set, every operation fails with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<Value>, StoreError> {
        self.check()?;
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, entry: NewRecord) -> Result<Record, StoreError> {
        self.check()?;
        let mut records = self.records.lock().await;
        push_record(&mut records, entry, Utc::now())
    }
}
