//! Repositories over the key-value seam.
//!
//! Every repository follows the same discipline: prepend on write and
//! truncate to a fixed cap; on read, decode each stored record
//! individually and drop anything that fails the schema check. Corrupt or
//! tampered state degrades to an empty store, never an error.

pub mod history;
pub mod reviews;
pub mod templates;

pub use history::HistoryRepository;
pub use reviews::{ReviewError, ReviewRepository};
pub use templates::TemplateRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::{KvStore, StoreError};

/// Reads are capped at this many records regardless of what is stored.
pub const READ_CAP: usize = 100;

/// Decode a stored JSON array record-by-record. Each element is decoded and
/// schema-checked on its own, so one bad record never poisons the rest.
/// Non-array or unparseable state reads as empty.
pub(crate) fn decode_records<T>(
    raw: Option<Vec<u8>>,
    is_valid: impl Fn(&T) -> bool,
) -> Vec<T>
where
    T: DeserializeOwned,
{
    let Some(bytes) = raw else {
        return Vec::new();
    };
    let Ok(values) = serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) else {
        return Vec::new();
    };

    values
        .into_iter()
        .filter_map(|value| serde_json::from_value::<T>(value).ok())
        .filter(|record| is_valid(record))
        .take(READ_CAP)
        .collect()
}

/// Serialize and persist a record list under one key.
pub(crate) fn write_records<S, T>(store: &S, key: &str, records: &[T]) -> Result<(), StoreError>
where
    S: KvStore,
    T: Serialize,
{
    // Serializing our own record types cannot fail; fall back to an empty
    // array rather than propagating an impossible error.
    let bytes = serde_json::to_vec(records).unwrap_or_else(|_| b"[]".to_vec());
    store.set(key, &bytes)
}
