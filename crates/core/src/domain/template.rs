use serde::{Deserialize, Serialize};

pub const MAX_TEMPLATE_TITLE_LEN: usize = 100;
pub const MAX_TEMPLATE_PROMPT_LEN: usize = 4000;

/// A prompt the user chose to keep. Same untrusted-on-read discipline as
/// [`crate::domain::history::SearchHistoryItem`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTemplate {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub agent_name: String,
    pub timestamp: i64,
}

impl SavedTemplate {
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && !self.title.is_empty()
            && self.title.chars().count() <= MAX_TEMPLATE_TITLE_LEN
            && !self.prompt.is_empty()
            && self.prompt.chars().count() <= MAX_TEMPLATE_PROMPT_LEN
            && self.agent_name.chars().count() <= 200
    }
}
