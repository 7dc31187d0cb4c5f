use chrono::Utc;

use agentscout_core::catalog::Catalog;
use agentscout_core::config::AppConfig;
use agentscout_core::domain::agent::AgentId;
use agentscout_store::kv::FileKvStore;
use agentscout_store::rate_limit::{RateLimitAction, RateLimitDecision, RateLimiter};
use agentscout_store::repositories::{ReviewError, ReviewRepository};

use super::{
    CommandResult, EXIT_INVALID_ARGUMENT, EXIT_RATE_LIMITED, EXIT_STORE, EXIT_UNKNOWN_AGENT,
};

pub fn add(config: &AppConfig, agent_id: &str, rating: i64, text: &str) -> CommandResult {
    let Some(agent) = resolve(agent_id) else {
        return unknown_agent(agent_id);
    };

    let store = match FileKvStore::new(&config.data_dir) {
        Ok(store) => store,
        Err(error) => {
            return CommandResult::failure("review", "store", error.to_string(), EXIT_STORE)
        }
    };

    let now = Utc::now();
    let limiter = RateLimiter::new(store.clone());
    if let RateLimitDecision::Deny { message, .. } = limiter.check(RateLimitAction::Review, now) {
        return CommandResult::failure("review", "rate_limited", message, EXIT_RATE_LIMITED);
    }

    let repository = ReviewRepository::new(store);
    match repository.add(&agent.id, rating, text) {
        Ok(()) => {}
        Err(ReviewError::Invalid(message)) => {
            return CommandResult::failure(
                "review",
                "invalid_argument",
                message,
                EXIT_INVALID_ARGUMENT,
            )
        }
        Err(ReviewError::Store(error)) => {
            return CommandResult::failure("review", "store", error.to_string(), EXIT_STORE)
        }
    }

    if let Err(error) = limiter.record(RateLimitAction::Review, now) {
        tracing::warn!(error = %error, "could not record rate-limit usage");
    }

    CommandResult::success(
        "review",
        serde_json::json!({ "agent_id": agent.id.0, "saved": true }),
    )
}

pub fn list(config: &AppConfig, agent_id: &str) -> CommandResult {
    let Some(agent) = resolve(agent_id) else {
        return unknown_agent(agent_id);
    };

    let store = match FileKvStore::new(&config.data_dir) {
        Ok(store) => store,
        Err(error) => {
            return CommandResult::failure("review", "store", error.to_string(), EXIT_STORE)
        }
    };

    let reviews = ReviewRepository::new(store).list(&agent.id);
    CommandResult::success(
        "review",
        serde_json::json!({
            "agent_id": agent.id.0,
            "count": reviews.len(),
            "reviews": reviews,
        }),
    )
}

fn resolve(agent_id: &str) -> Option<&'static agentscout_core::domain::agent::Agent> {
    Catalog::builtin().agent_by_id(&AgentId(agent_id.to_string()))
}

fn unknown_agent(agent_id: &str) -> CommandResult {
    CommandResult::failure(
        "review",
        "unknown_agent",
        format!("no catalog agent with id `{agent_id}`"),
        EXIT_UNKNOWN_AGENT,
    )
}

#[cfg(test)]
mod tests {
    use agentscout_core::config::AppConfig;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig { data_dir: dir.to_path_buf(), ..AppConfig::default() }
    }

    #[test]
    fn add_then_list_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path());

        let added = super::add(&config, "cursor", 5, "saved me hours of debugging");
        assert_eq!(added.exit_code, 0);

        let listed = super::list(&config, "cursor");
        let parsed: serde_json::Value = serde_json::from_str(&listed.output).expect("json");
        assert_eq!(parsed["data"]["count"], 1);
        assert_eq!(parsed["data"]["reviews"][0]["rating"], 5);
    }

    #[test]
    fn out_of_range_rating_is_an_argument_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = super::add(&config_in(dir.path()), "cursor", 7, "fine tool");
        assert_eq!(result.exit_code, super::EXIT_INVALID_ARGUMENT);
    }

    #[test]
    fn fourth_review_in_a_minute_is_rate_limited() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path());

        for i in 0..3 {
            let result = super::add(&config, "cursor", 4, &format!("review number {i}"));
            assert_eq!(result.exit_code, 0);
        }
        let denied = super::add(&config, "cursor", 4, "one too many");
        assert_eq!(denied.exit_code, super::EXIT_RATE_LIMITED);
    }

    #[test]
    fn unknown_agent_is_a_clean_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = super::list(&config_in(dir.path()), "nonexistent");
        assert_eq!(result.exit_code, super::EXIT_UNKNOWN_AGENT);
    }
}
