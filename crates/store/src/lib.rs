pub mod kv;
pub mod rate_limit;
pub mod repositories;

pub use kv::{FileKvStore, InMemoryKvStore, KvStore, StoreError};
pub use rate_limit::{RateLimitAction, RateLimitDecision, RateLimiter};
pub use repositories::{
    HistoryRepository, ReviewError, ReviewRepository, TemplateRepository, READ_CAP,
};
