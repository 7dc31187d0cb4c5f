use chrono::Utc;

use agentscout_core::catalog::Catalog;
use agentscout_core::config::AppConfig;
use agentscout_core::domain::agent::AgentId;
use agentscout_core::refinement::{valid_options, RefinementEvent, RefinementSession, SessionError};
use agentscout_store::kv::FileKvStore;
use agentscout_store::rate_limit::{RateLimitAction, RateLimitDecision, RateLimiter};
use agentscout_store::repositories::TemplateRepository;

use super::{
    CommandResult, EXIT_INVALID_ARGUMENT, EXIT_RATE_LIMITED, EXIT_STORE, EXIT_UNKNOWN_AGENT,
};

pub fn run(
    config: &AppConfig,
    query: &str,
    agent_id: &str,
    answers: &[String],
    save_as: Option<&str>,
) -> CommandResult {
    let store = match FileKvStore::new(&config.data_dir) {
        Ok(store) => store,
        Err(error) => {
            return CommandResult::failure("refine", "store", error.to_string(), EXIT_STORE)
        }
    };

    let now = Utc::now();
    let limiter = RateLimiter::new(store.clone());
    if let RateLimitDecision::Deny { message, .. } = limiter.check(RateLimitAction::Refine, now) {
        return CommandResult::failure("refine", "rate_limited", message, EXIT_RATE_LIMITED);
    }

    let pairs = match parse_answer_pairs(answers) {
        Ok(pairs) => pairs,
        Err(message) => {
            return CommandResult::failure(
                "refine",
                "invalid_argument",
                message,
                EXIT_INVALID_ARGUMENT,
            )
        }
    };

    let catalog = Catalog::builtin();
    let mut session =
        match RefinementSession::start(catalog, query, &AgentId(agent_id.to_string())) {
            Ok(session) => session,
            Err(SessionError::EmptyQuery) => {
                return CommandResult::failure(
                    "refine",
                    "invalid_argument",
                    "refinement requires a non-empty query",
                    EXIT_INVALID_ARGUMENT,
                )
            }
            Err(SessionError::UnknownAgent(id)) => {
                return CommandResult::failure(
                    "refine",
                    "unknown_agent",
                    format!("no catalog agent with id `{id}`"),
                    EXIT_UNKNOWN_AGENT,
                )
            }
        };

    // Whitelist-invalid pairs are ignored by the engine; report them back
    // instead of failing so one typo does not discard the rest.
    let mut ignored: Vec<String> = Vec::new();
    for (question_id, value) in &pairs {
        if !valid_options(question_id).contains(&value.as_str()) {
            ignored.push(format!("{question_id}={value}"));
            continue;
        }
        session.toggle_answer(question_id, value);
    }

    let summary = session.summary();
    if session.apply(RefinementEvent::Skip).is_err() {
        // A fresh session always accepts Skip; reaching this is a logic bug.
        return CommandResult::failure(
            "refine",
            "internal",
            "refinement session rejected prompt generation",
            EXIT_INVALID_ARGUMENT,
        );
    }
    let prompt = session.prompt().unwrap_or_default().to_string();

    if let Err(error) = limiter.record(RateLimitAction::Refine, now) {
        tracing::warn!(error = %error, "could not record rate-limit usage");
    }

    let mut saved_template = false;
    if let Some(title) = save_as {
        let templates = TemplateRepository::new(store);
        match templates.save(title, &prompt, &session.agent().name) {
            Ok(()) => saved_template = true,
            Err(error) => {
                return CommandResult::failure("refine", "store", error.to_string(), EXIT_STORE)
            }
        }
    }

    tracing::info!(agent_id, answered = pairs.len() - ignored.len(), "refinement completed");

    CommandResult::success(
        "refine",
        serde_json::json!({
            "agent_id": session.agent().id.0,
            "summary": summary,
            "prompt": prompt,
            "ignored_answers": ignored,
            "saved_template": saved_template,
        }),
    )
}

fn parse_answer_pairs(answers: &[String]) -> Result<Vec<(String, String)>, String> {
    answers
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .map(|(question_id, value)| (question_id.to_string(), value.to_string()))
                .ok_or_else(|| format!("invalid --answer `{raw}` (expected QUESTION=VALUE)"))
        })
        .collect()
}
