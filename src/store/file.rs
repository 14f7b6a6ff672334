//! JSON file backend.
//!
//! The whole file is read on every call and rewritten (pretty-printed) on
//! every append. The file must already exist and contain a JSON array; it is
//! never created here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::instrument;

use super::{parse_records, push_record, NewRecord, Record, RecordStore};
use crate::error::StoreError;

/// Record store persisted as a single JSON array file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Value>, StoreError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        parse_records(&contents)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    #[instrument(name = "store::read_all", skip(self), fields(path = %self.path.display()))]
    async fn read_all(&self) -> Result<Vec<Value>, StoreError> {
        let records = self.load().await?;
        tracing::debug!(count = records.len(), "Read records");
        Ok(records)
    }

    #[instrument(name = "store::append", skip(self, entry), fields(path = %self.path.display()))]
    async fn append(&self, entry: NewRecord) -> Result<Record, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let record = push_record(&mut records, entry, Utc::now())?;

        let serialized = serde_json::to_string_pretty(&records)?;
        tokio::fs::write(&self.path, serialized).await?;

        tracing::debug!(id = record.id, count = records.len(), "Appended record");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entry(name: &str, address: &str) -> NewRecord {
        NewRecord::new(name, address)
    }

    fn store_with(contents: &str) -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, contents).unwrap();
        (dir, JsonFileStore::new(path))
    }

    #[tokio::test]
    async fn test_read_all_returns_file_contents() {
        let (_dir, store) = store_with(
            r#"[{"id":1,"name":"A","address":"X","timestamp":"2024-01-01T00:00:00.000Z"}]"#,
        );

        let records = store.read_all().await.unwrap();
        assert_eq!(
            records,
            vec![json!({"id":1,"name":"A","address":"X","timestamp":"2024-01-01T00:00:00.000Z"})]
        );
    }

    #[tokio::test]
    async fn test_read_all_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));

        assert!(matches!(store.read_all().await, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_read_all_invalid_json() {
        let (_dir, store) = store_with("[{");
        assert!(matches!(store.read_all().await, Err(StoreError::Json(_))));
    }

    #[tokio::test]
    async fn test_append_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let store = JsonFileStore::new(&path);

        assert!(store.append(entry("Bob", "1 Main St")).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_append_rewrites_pretty_printed() {
        let (_dir, store) = store_with("[]");

        let record = store.append(entry("Bob", "1 Main St")).await.unwrap();
        assert_eq!(record.id, 1);

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert!(written.starts_with("[\n  {\n    \"id\": 1,\n    \"name\": \"Bob\""));

        let records = store.read_all().await.unwrap();
        assert_eq!(records, vec![serde_json::to_value(&record).unwrap()]);
    }

    #[tokio::test]
    async fn test_append_keeps_existing_elements_verbatim() {
        let (_dir, store) = store_with(r#"[{"zeta":1,"alpha":{"nested":[1,2]}}]"#);

        let record = store.append(entry("Bob", "1 Main St")).await.unwrap();
        assert_eq!(record.id, 2);

        let written = std::fs::read_to_string(store.path()).unwrap();
        let zeta = written.find("\"zeta\"").unwrap();
        let alpha = written.find("\"alpha\"").unwrap();
        assert!(zeta < alpha, "existing key order must survive a rewrite");

        let records = store.read_all().await.unwrap();
        assert_eq!(records[0], json!({"zeta":1,"alpha":{"nested":[1,2]}}));
    }

    #[tokio::test]
    async fn test_sequential_appends_increment_ids() {
        let (_dir, store) = store_with("[]");

        let first = store.append(entry("A", "X")).await.unwrap();
        let second = store.append(entry("B", "Y")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let records = store.read_all().await.unwrap();
        assert_eq!(records[0]["name"], "A");
        assert_eq!(records[1]["name"], "B");
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_every_record() {
        let (_dir, store) = store_with("[]");
        let store = Arc::new(store);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(entry(&format!("n{i}"), "addr")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
        assert_eq!(store.read_all().await.unwrap().len(), 16);
    }
}
