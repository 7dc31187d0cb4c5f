use serde::{Deserialize, Serialize};

pub const MAX_HISTORY_QUERY_LEN: usize = 500;
pub const MAX_HISTORY_AGENT_NAME_LEN: usize = 200;

/// One persisted search record. Stored state is untrusted; `is_valid` is the
/// schema check applied on every read, and records failing it are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub id: String,
    pub query: String,
    pub timestamp: i64,
    pub top_agent_name: String,
}

impl SearchHistoryItem {
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && !self.query.is_empty()
            && self.query.chars().count() <= MAX_HISTORY_QUERY_LEN
            && self.top_agent_name.chars().count() <= MAX_HISTORY_AGENT_NAME_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::SearchHistoryItem;

    fn item() -> SearchHistoryItem {
        SearchHistoryItem {
            id: "h-1".to_string(),
            query: "build a saas dashboard".to_string(),
            timestamp: 1_760_000_000_000,
            top_agent_name: "Lovable".to_string(),
        }
    }

    #[test]
    fn well_formed_item_is_valid() {
        assert!(item().is_valid());
    }

    #[test]
    fn empty_id_or_query_is_invalid() {
        let mut no_id = item();
        no_id.id.clear();
        assert!(!no_id.is_valid());

        let mut no_query = item();
        no_query.query.clear();
        assert!(!no_query.is_valid());
    }

    #[test]
    fn over_long_fields_are_invalid() {
        let mut long_query = item();
        long_query.query = "q".repeat(501);
        assert!(!long_query.is_valid());

        let mut long_name = item();
        long_name.top_agent_name = "a".repeat(201);
        assert!(!long_name.is_valid());
    }
}
