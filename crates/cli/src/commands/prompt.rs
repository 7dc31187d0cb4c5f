use agentscout_core::catalog::Catalog;
use agentscout_core::domain::agent::AgentId;
use agentscout_core::prompt::generate_prompt;

use super::{CommandResult, EXIT_UNKNOWN_AGENT};

pub fn run(query: &str, agent_id: &str) -> CommandResult {
    let catalog = Catalog::builtin();
    let Some(agent) = catalog.agent_by_id(&AgentId(agent_id.to_string())) else {
        return CommandResult::failure(
            "prompt",
            "unknown_agent",
            format!("no catalog agent with id `{agent_id}`"),
            EXIT_UNKNOWN_AGENT,
        );
    };

    let prompt = generate_prompt(query, agent);
    CommandResult::success(
        "prompt",
        serde_json::json!({
            "agent_id": agent.id.0,
            "agent_name": agent.name,
            "prompt": prompt,
        }),
    )
}
