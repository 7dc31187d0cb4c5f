use chrono::Utc;
use uuid::Uuid;

use agentscout_core::domain::history::{SearchHistoryItem, MAX_HISTORY_AGENT_NAME_LEN};
use agentscout_core::sanitize::sanitize_query;

use crate::kv::{KvStore, StoreError};
use crate::repositories::{decode_records, write_records};

const HISTORY_KEY: &str = "history";
/// The writer keeps only this many most-recent records.
pub const MAX_SAVED_SEARCHES: usize = 50;

/// Append/read/clear over past search queries. Newest first.
#[derive(Clone, Debug)]
pub struct HistoryRepository<S> {
    store: S,
}

impl<S: KvStore> HistoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record one search. The query is sanitized before storage; a query
    /// that sanitizes to empty is silently skipped.
    pub fn append(&self, query: &str, top_agent_name: &str) -> Result<(), StoreError> {
        let clean_query = sanitize_query(query);
        if clean_query.is_empty() {
            return Ok(());
        }

        let item = SearchHistoryItem {
            id: Uuid::new_v4().to_string(),
            query: clean_query,
            timestamp: Utc::now().timestamp_millis(),
            top_agent_name: top_agent_name.chars().take(MAX_HISTORY_AGENT_NAME_LEN).collect(),
        };

        let mut items = self.read_all();
        items.insert(0, item);
        items.truncate(MAX_SAVED_SEARCHES);
        write_records(&self.store, HISTORY_KEY, &items)
    }

    /// All valid stored records, newest first. Schema-violating records are
    /// dropped; corrupt state reads as empty.
    pub fn read_all(&self) -> Vec<SearchHistoryItem> {
        decode_records(self.store.get(HISTORY_KEY), SearchHistoryItem::is_valid)
    }

    pub fn clear(&self) {
        self.store.remove(HISTORY_KEY);
    }
}
