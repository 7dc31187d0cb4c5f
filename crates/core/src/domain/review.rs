use serde::{Deserialize, Serialize};

pub const MAX_REVIEW_TEXT_LEN: usize = 300;
pub const MIN_REVIEW_TEXT_LEN: usize = 3;

/// A user review of one agent, persisted per agent id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReview {
    pub id: String,
    pub rating: u8,
    pub text: String,
    pub timestamp: i64,
}

impl AgentReview {
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && (1..=5).contains(&self.rating)
            && self.text.chars().count() >= MIN_REVIEW_TEXT_LEN
            && self.text.chars().count() <= MAX_REVIEW_TEXT_LEN
    }
}
