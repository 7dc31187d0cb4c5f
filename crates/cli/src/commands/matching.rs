use chrono::Utc;

use agentscout_core::config::AppConfig;
use agentscout_core::matching::{confidence_pct, MatchEngine};
use agentscout_core::sanitize::sanitize_query;
use agentscout_core::stack::StackRecommender;
use agentscout_store::kv::FileKvStore;
use agentscout_store::rate_limit::{RateLimitAction, RateLimitDecision, RateLimiter};
use agentscout_store::repositories::HistoryRepository;

use super::{CommandResult, EXIT_RATE_LIMITED, EXIT_STORE};

pub fn run(config: &AppConfig, query: &str, with_stack: bool) -> CommandResult {
    let store = match FileKvStore::new(&config.data_dir) {
        Ok(store) => store,
        Err(error) => {
            return CommandResult::failure("match", "store", error.to_string(), EXIT_STORE)
        }
    };

    let now = Utc::now();
    let limiter = RateLimiter::new(store.clone());
    if let RateLimitDecision::Deny { message, .. } = limiter.check(RateLimitAction::Search, now) {
        return CommandResult::failure("match", "rate_limited", message, EXIT_RATE_LIMITED);
    }

    let engine = MatchEngine::builtin();
    let results = engine.analyze_query(query);

    if let Err(error) = limiter.record(RateLimitAction::Search, now) {
        tracing::warn!(error = %error, "could not record rate-limit usage");
    }

    if let Some(top) = results.first() {
        let history = HistoryRepository::new(store);
        if let Err(error) = history.append(query, &top.agent.name) {
            tracing::warn!(error = %error, "could not append search history");
        }
    }

    let stack = with_stack
        .then(|| StackRecommender::builtin().recommend_tech_stack(query))
        .flatten();

    tracing::info!(result_count = results.len(), "query analyzed");

    let data = serde_json::json!({
        "query": sanitize_query(query),
        "results": results
            .iter()
            .map(|result| {
                serde_json::json!({
                    "agent_id": result.agent.id.0,
                    "name": result.agent.name,
                    "category": result.agent.category.label(),
                    "score": result.score,
                    "confidence_pct": confidence_pct(result.score),
                    "reasoning": result.reasoning,
                })
            })
            .collect::<Vec<_>>(),
        "stack": stack,
    });

    CommandResult::success("match", data)
}

#[cfg(test)]
mod tests {
    use agentscout_core::config::AppConfig;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig { data_dir: dir.to_path_buf(), ..AppConfig::default() }
    }

    #[test]
    fn match_reports_ranked_results_and_saves_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path());

        let result = super::run(&config, "I want to build a SaaS dashboard", true);
        assert_eq!(result.exit_code, 0);

        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        let results = parsed["data"]["results"].as_array().expect("results array");
        assert!(!results.is_empty());
        assert!(results[0]["confidence_pct"].as_u64().expect("confidence") <= 99);
        assert_eq!(parsed["data"]["stack"]["use_case"], "SaaS Dashboard");

        // A successful match lands in the history store.
        let store = agentscout_store::kv::FileKvStore::new(dir.path()).expect("store");
        let history = agentscout_store::repositories::HistoryRepository::new(store);
        assert_eq!(history.read_all().len(), 1);
    }

    #[test]
    fn empty_query_is_ok_with_no_results_and_no_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path());

        let result = super::run(&config, "   ", false);
        assert_eq!(result.exit_code, 0);

        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        assert_eq!(parsed["data"]["results"].as_array().map(Vec::len), Some(0));
        assert!(parsed["data"]["stack"].is_null());

        let store = agentscout_store::kv::FileKvStore::new(dir.path()).expect("store");
        let history = agentscout_store::repositories::HistoryRepository::new(store);
        assert!(history.read_all().is_empty());
    }

    #[test]
    fn eleventh_search_in_a_minute_is_rate_limited() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path());

        for _ in 0..10 {
            assert_eq!(super::run(&config, "build a site", false).exit_code, 0);
        }
        let denied = super::run(&config, "build a site", false);
        assert_eq!(denied.exit_code, super::EXIT_RATE_LIMITED);

        let parsed: serde_json::Value = serde_json::from_str(&denied.output).expect("json");
        assert_eq!(parsed["error_class"], "rate_limited");
    }
}
