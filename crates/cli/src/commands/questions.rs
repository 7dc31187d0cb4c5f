use agentscout_core::catalog::Catalog;
use agentscout_core::domain::agent::AgentId;
use agentscout_core::refinement::generate_agent_questions;

use super::{CommandResult, EXIT_UNKNOWN_AGENT};

pub fn run(agent_id: &str) -> CommandResult {
    let catalog = Catalog::builtin();
    let Some(agent) = catalog.agent_by_id(&AgentId(agent_id.to_string())) else {
        return CommandResult::failure(
            "questions",
            "unknown_agent",
            format!("no catalog agent with id `{agent_id}`"),
            EXIT_UNKNOWN_AGENT,
        );
    };

    let steps = generate_agent_questions("", agent);
    let data = serde_json::json!({
        "agent_id": agent.id.0,
        "steps": steps
            .iter()
            .map(|step| {
                serde_json::json!({
                    "title": step.title,
                    "questions": step
                        .questions
                        .iter()
                        .map(|question| {
                            serde_json::json!({
                                "id": question.id,
                                "text": question.text,
                                "options": question
                                    .options
                                    .iter()
                                    .map(|option| {
                                        serde_json::json!({
                                            "label": option.label,
                                            "value": option.value,
                                        })
                                    })
                                    .collect::<Vec<_>>(),
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    });

    CommandResult::success("questions", data)
}
