//! Sliding-window rate limiting over the key-value store.
//!
//! Each action keeps a list of request timestamps; only timestamps inside
//! the window count. `check` decides without mutating; `record` is called
//! after the action succeeds. The caller supplies the current time, so
//! decisions are reproducible.

use chrono::{DateTime, Utc};

use crate::kv::{KvStore, StoreError};

/// Rate-limited action classes and their windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RateLimitAction {
    Search,
    Refine,
    Submission,
    Review,
    Sandbox,
    Daily,
}

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

impl RateLimitAction {
    fn key(&self) -> &'static str {
        match self {
            RateLimitAction::Search => "rl-search",
            RateLimitAction::Refine => "rl-refine",
            RateLimitAction::Submission => "rl-submission",
            RateLimitAction::Review => "rl-review",
            RateLimitAction::Sandbox => "rl-sandbox",
            RateLimitAction::Daily => "rl-daily",
        }
    }

    pub fn max_requests(&self) -> usize {
        match self {
            RateLimitAction::Search => 10,
            RateLimitAction::Refine => 15,
            RateLimitAction::Submission => 5,
            RateLimitAction::Review => 3,
            RateLimitAction::Sandbox => 5,
            RateLimitAction::Daily => 100,
        }
    }

    pub fn window_ms(&self) -> i64 {
        match self {
            RateLimitAction::Search
            | RateLimitAction::Refine
            | RateLimitAction::Review
            | RateLimitAction::Sandbox => MINUTE_MS,
            RateLimitAction::Submission => HOUR_MS,
            RateLimitAction::Daily => DAY_MS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateLimitAction::Search => "search requests",
            RateLimitAction::Refine => "refinement requests",
            RateLimitAction::Submission => "agent submissions",
            RateLimitAction::Review => "review submissions",
            RateLimitAction::Sandbox => "sandbox tries",
            RateLimitAction::Daily => "daily AI requests",
        }
    }
}

/// Outcome of a limit check. A denial carries how long to wait and a
/// user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allow { remaining: usize },
    Deny { retry_after_ms: i64, message: String },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allow { .. })
    }
}

#[derive(Clone, Debug)]
pub struct RateLimiter<S> {
    store: S,
}

impl<S: KvStore> RateLimiter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Decide whether an action is allowed at `now`. Never mutates stored
    /// state; corrupt state reads as an empty window.
    pub fn check(&self, action: RateLimitAction, now: DateTime<Utc>) -> RateLimitDecision {
        let now_ms = now.timestamp_millis();
        let timestamps = self.window_timestamps(action, now_ms);

        if timestamps.len() >= action.max_requests() {
            // Retry once the oldest timestamp leaves the window.
            let oldest = timestamps.iter().copied().min().unwrap_or(now_ms);
            let retry_after_ms = (oldest + action.window_ms() - now_ms).max(0);
            let retry_secs = (retry_after_ms + 999) / 1000;
            return RateLimitDecision::Deny {
                retry_after_ms,
                message: format!(
                    "You've hit the limit for {}. Try again in {retry_secs}s.",
                    action.label()
                ),
            };
        }

        RateLimitDecision::Allow { remaining: action.max_requests() - timestamps.len() }
    }

    /// Record one successful action at `now`.
    pub fn record(&self, action: RateLimitAction, now: DateTime<Utc>) -> Result<(), StoreError> {
        let now_ms = now.timestamp_millis();
        let mut timestamps = self.window_timestamps(action, now_ms);
        timestamps.push(now_ms);

        let bytes = serde_json::to_vec(&timestamps).unwrap_or_else(|_| b"[]".to_vec());
        self.store.set(action.key(), &bytes)
    }

    /// Stored timestamps still inside the window. Anything unreadable or
    /// non-numeric is discarded.
    fn window_timestamps(&self, action: RateLimitAction, now_ms: i64) -> Vec<i64> {
        let window_start = now_ms - action.window_ms();
        let Some(bytes) = self.store.get(action.key()) else {
            return Vec::new();
        };
        let Ok(values) = serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) else {
            return Vec::new();
        };
        values
            .into_iter()
            .filter_map(|value| value.as_i64())
            .filter(|timestamp| *timestamp > window_start)
            .collect()
    }
}
