use agentscout_core::stack::StackRecommender;

use super::CommandResult;

pub fn run(query: &str) -> CommandResult {
    let recommendation = StackRecommender::builtin().recommend_tech_stack(query);
    CommandResult::success("stack", serde_json::json!({ "stack": recommendation }))
}
