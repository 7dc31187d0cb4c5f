use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use agentscout_core::domain::agent::AgentId;
use agentscout_core::domain::review::AgentReview;
use agentscout_core::sanitize::{validate_rating, validate_review};

use crate::kv::{KvStore, StoreError};
use crate::repositories::{decode_records, write_records};

pub const MAX_SAVED_REVIEWS: usize = 50;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// User reviews, persisted per agent id.
#[derive(Clone, Debug)]
pub struct ReviewRepository<S> {
    store: S,
}

impl<S: KvStore> ReviewRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn key_for(agent_id: &AgentId) -> String {
        format!("reviews-{}", agent_id.0)
    }

    /// Validate and store one review. Rating must be 1..=5; text must
    /// sanitize to at least 3 characters.
    pub fn add(&self, agent_id: &AgentId, rating: i64, text: &str) -> Result<(), ReviewError> {
        if let Some(message) = validate_rating(rating) {
            return Err(ReviewError::Invalid(message));
        }
        let sanitized = validate_review(text).map_err(ReviewError::Invalid)?;

        let review = AgentReview {
            id: Uuid::new_v4().to_string(),
            rating: rating as u8,
            text: sanitized,
            timestamp: Utc::now().timestamp_millis(),
        };

        let key = Self::key_for(agent_id);
        let mut reviews = self.list(agent_id);
        reviews.insert(0, review);
        reviews.truncate(MAX_SAVED_REVIEWS);
        write_records(&self.store, &key, &reviews)?;
        Ok(())
    }

    pub fn list(&self, agent_id: &AgentId) -> Vec<AgentReview> {
        decode_records(self.store.get(&Self::key_for(agent_id)), AgentReview::is_valid)
    }

    pub fn clear(&self, agent_id: &AgentId) {
        self.store.remove(&Self::key_for(agent_id));
    }
}
