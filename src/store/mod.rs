//! Record storage.
//!
//! The store is an ordered JSON array of records. Handlers only see the
//! [`RecordStore`] trait; the JSON file backend is used in production and the
//! in-memory backend in tests.
//!
//! Record ids are derived from the array length at insertion time
//! (`len + 1`). They are not stable identifiers and would collide if records
//! were ever removed.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// A stored record as written by [`RecordStore::append`].
///
/// `name` and `address` keep whatever JSON value the client sent; only their
/// presence is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: Value,
    pub address: Value,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Validated input for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: Value,
    pub address: Value,
}

impl NewRecord {
    pub fn new(name: impl Into<Value>, address: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Extracts `name` and `address` from a request body.
    ///
    /// The body must be a JSON object. Returns `None` when either field is
    /// absent or falsy (`null`, `false`, `0`, `""`). Other values of any type
    /// are accepted as-is.
    pub fn from_body(body: &Value) -> Option<Self> {
        let fields = body.as_object()?;
        let name = fields.get("name").filter(|v| is_present(v))?;
        let address = fields.get("address").filter(|v| is_present(v))?;
        Some(Self {
            name: name.clone(),
            address: address.clone(),
        })
    }
}

/// A field counts as present unless it is `null`, `false`, zero or an empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Storage backend for records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every stored element in insertion order, as stored.
    async fn read_all(&self) -> Result<Vec<Value>, StoreError>;

    /// Appends a record, assigning its id and timestamp.
    async fn append(&self, entry: NewRecord) -> Result<Record, StoreError>;
}

/// Parses store contents, which must be a top-level JSON array.
pub(crate) fn parse_records(contents: &str) -> Result<Vec<Value>, StoreError> {
    match serde_json::from_str::<Value>(contents)? {
        Value::Array(records) => Ok(records),
        _ => Err(StoreError::NotAnArray),
    }
}

/// Builds the next record for `records` and pushes it onto the end.
pub(crate) fn push_record(
    records: &mut Vec<Value>,
    entry: NewRecord,
    now: DateTime<Utc>,
) -> Result<Record, StoreError> {
    let record = Record {
        id: records.len() as u64 + 1,
        name: entry.name,
        address: entry.address,
        timestamp: now,
    };
    records.push(serde_json::to_value(&record)?);
    Ok(record)
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
