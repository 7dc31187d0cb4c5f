//! Prompt generation.
//!
//! [`generate_prompt`] produces the initial template for a matched agent;
//! [`generate_custom_prompt`] and [`build_refinement_summary`] are the
//! refinement flow's category-aware siblings, shaped by accumulated answers.

use crate::domain::agent::Agent;
use crate::refinement::answers::RefinementAnswers;
use crate::refinement::questions::{RefinementQuestion, RefinementStep};
use crate::sanitize::sanitize_query;

/// Maximum number of agent capabilities named in a custom prompt.
const MAX_PROMPT_CAPABILITIES: usize = 5;

/// How the user wants the response structured, from the `output_pref`
/// answer. Unset or unrecognized values fall back to
/// [`DEFAULT_OUTPUT_INSTRUCTION`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputPreference {
    Steps,
    Summary,
    Detailed,
    Template,
}

pub const DEFAULT_OUTPUT_INSTRUCTION: &str = "Be thorough but concise.";

impl OutputPreference {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "steps" => Some(OutputPreference::Steps),
            "summary" => Some(OutputPreference::Summary),
            "detailed" => Some(OutputPreference::Detailed),
            "template" => Some(OutputPreference::Template),
            _ => None,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            OutputPreference::Steps => "Present your response as a numbered step-by-step guide.",
            OutputPreference::Summary => "Keep your response concise and to the point.",
            OutputPreference::Detailed => {
                "Provide a comprehensive, detailed response with examples."
            }
            OutputPreference::Template => "Provide a ready-to-use template or boilerplate.",
        }
    }
}

/// The user's technical level, from the `tech_level` answer. Unset means no
/// level instruction is added at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TechLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl TechLevel {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(TechLevel::Beginner),
            "intermediate" => Some(TechLevel::Intermediate),
            "expert" => Some(TechLevel::Expert),
            _ => None,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            TechLevel::Beginner => {
                "Explain concepts simply, avoid jargon, and include beginner-friendly context."
            }
            TechLevel::Intermediate => {
                "Assume some familiarity with the topic. Include relevant technical details."
            }
            TechLevel::Expert => "Be direct and technical. Skip basic explanations.",
        }
    }
}

/// The initial prompt for a matched agent: the sanitized query embedded in a
/// fixed instructional template. Deterministic given its inputs.
pub fn generate_prompt(raw_query: &str, agent: &Agent) -> String {
    let clean_query = sanitize_query(raw_query);

    let body = format!(
        "You are an expert assistant. The user needs help with the following:\n\n\
         \"{clean_query}\"\n\n\
         Please provide a detailed, actionable response. Break down the problem into clear steps. \
         If this involves building something, provide architecture recommendations, key \
         implementation details, and potential challenges to watch out for. If this involves \
         content creation, provide structured output with examples. Be thorough but concise."
    );

    format!("# Optimized Prompt for {}\n\n{}", agent.name, body)
}

/// The refined prompt: query, answer context, output-style and tech-level
/// instructions, and up to five agent capabilities.
pub fn generate_custom_prompt(
    raw_query: &str,
    agent: &Agent,
    answers: &RefinementAnswers,
    steps: &[RefinementStep],
) -> String {
    let clean_query = sanitize_query(raw_query);
    let context_parts = answered_lines(answers, steps, " ");

    let output_instruction = answers
        .first("output_pref")
        .and_then(OutputPreference::from_value)
        .map(|preference| preference.instruction())
        .unwrap_or(DEFAULT_OUTPUT_INSTRUCTION);

    let tech_suffix = answers
        .first("tech_level")
        .and_then(TechLevel::from_value)
        .map(|level| format!(" {}", level.instruction()))
        .unwrap_or_default();

    let context_section = if context_parts.is_empty() {
        String::new()
    } else {
        let bullets =
            context_parts.iter().map(|part| format!("- {part}")).collect::<Vec<_>>().join("\n");
        format!("\n\nContext about the user's needs:\n{bullets}")
    };

    let capabilities_section = if agent.capabilities.is_empty() {
        String::new()
    } else {
        let listed = agent
            .capabilities
            .iter()
            .take(MAX_PROMPT_CAPABILITIES)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        format!("\nLeverage these capabilities: {listed}.")
    };

    let body = format!(
        "You are {name}, {description}\n\n\
         The user needs help with the following:\n\n\
         \"{clean_query}\"{context_section}\n\n\
         {output_instruction}{tech_suffix}{capabilities_section}\n\n\
         Provide a detailed, actionable response. If this involves building something, include \
         architecture recommendations and key implementation details. If this involves content, \
         provide structured output with examples.",
        name = agent.name,
        description = agent.description.to_lowercase(),
    );

    format!("# Custom Prompt for {}\n\n{}", agent.name, body)
}

/// Line-oriented recap: the agent and query first, then one line per
/// answered question. Unanswered questions are omitted.
pub fn build_refinement_summary(
    raw_query: &str,
    agent: &Agent,
    answers: &RefinementAnswers,
    steps: &[RefinementStep],
) -> String {
    let clean_query = sanitize_query(raw_query);
    let mut lines = vec![format!("Using **{}** to: \"{clean_query}\"", agent.name)];
    lines.extend(answered_lines(answers, steps, " → "));
    lines.join("\n")
}

/// One rendered line per answered question: question text, separator, then
/// the comma-joined labels of the selected values. A selected value whose
/// option cannot be resolved renders its raw value.
fn answered_lines(
    answers: &RefinementAnswers,
    steps: &[RefinementStep],
    separator: &str,
) -> Vec<String> {
    let all_questions: Vec<&RefinementQuestion> =
        steps.iter().flat_map(|step| step.questions.iter()).collect();

    let mut lines = Vec::new();
    for (question_id, values) in answers.iter() {
        if values.is_empty() {
            continue;
        }
        let Some(question) = all_questions.iter().find(|q| q.id == question_id) else {
            continue;
        };
        let labels = values
            .iter()
            .map(|value| {
                question
                    .options
                    .iter()
                    .find(|option| option.value == value)
                    .map(|option| option.label)
                    .unwrap_or(value.as_str())
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("{}{}{}", question.text, separator, labels));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{
        build_refinement_summary, generate_custom_prompt, generate_prompt, OutputPreference,
        TechLevel, DEFAULT_OUTPUT_INSTRUCTION,
    };
    use crate::catalog::Catalog;
    use crate::domain::agent::{Agent, AgentCategory};
    use crate::refinement::answers::RefinementAnswers;
    use crate::refinement::questions::generate_agent_questions;

    fn agent_in(category: AgentCategory) -> &'static Agent {
        Catalog::builtin()
            .agents()
            .iter()
            .find(|agent| agent.category == category)
            .expect("catalog covers every category used in tests")
    }

    #[test]
    fn initial_prompt_is_titled_and_embeds_the_query() {
        let agent = agent_in(AgentCategory::Writing);
        let prompt = generate_prompt("write a <b>newsletter</b>   intro", agent);

        assert!(prompt.starts_with(&format!("# Optimized Prompt for {}\n\n", agent.name)));
        assert!(prompt.contains("\"write a newsletter intro\""));
        assert!(!prompt.contains("<b>"));
    }

    #[test]
    fn custom_prompt_uses_output_pref_instruction_verbatim() {
        let agent = agent_in(AgentCategory::Writing);
        let steps = generate_agent_questions("write a blog post", agent);
        let mut answers = RefinementAnswers::new();
        answers.toggle("output_pref", "steps");

        let prompt = generate_custom_prompt("write a blog post", agent, &answers, &steps);
        assert!(prompt.starts_with(&format!("# Custom Prompt for {}\n\n", agent.name)));
        assert!(prompt.contains(OutputPreference::Steps.instruction()));
        assert!(!prompt.contains(DEFAULT_OUTPUT_INSTRUCTION));
    }

    #[test]
    fn custom_prompt_without_preferences_uses_defaults() {
        let agent = agent_in(AgentCategory::Chatbot);
        let steps = generate_agent_questions("answer questions", agent);
        let answers = RefinementAnswers::new();

        let prompt = generate_custom_prompt("answer questions", agent, &answers, &steps);
        assert!(prompt.contains(DEFAULT_OUTPUT_INSTRUCTION));
        assert!(!prompt.contains(TechLevel::Beginner.instruction()));
        assert!(!prompt.contains("Context about the user's needs:"));
    }

    #[test]
    fn custom_prompt_renders_answer_context_with_labels() {
        let agent = agent_in(AgentCategory::CodeAssistant);
        let steps = generate_agent_questions("fix my build", agent);
        let mut answers = RefinementAnswers::new();
        answers.toggle("code_task", "debug");
        answers.toggle("code_lang", "systems");
        answers.toggle("tech_level", "expert");

        let prompt = generate_custom_prompt("fix my build", agent, &answers, &steps);
        assert!(prompt.contains("Context about the user's needs:"));
        assert!(prompt.contains("- What do you need help with? Debugging / Fixing"));
        assert!(prompt.contains("- Primary language or framework? Go / Rust"));
        assert!(prompt.contains(TechLevel::Expert.instruction()));
    }

    #[test]
    fn custom_prompt_lists_at_most_five_capabilities() {
        let agent = agent_in(AgentCategory::Chatbot);
        assert!(agent.capabilities.len() >= 5);
        let steps = generate_agent_questions("help", agent);
        let prompt = generate_custom_prompt("help", agent, &RefinementAnswers::new(), &steps);

        let line = prompt
            .lines()
            .find(|line| line.starts_with("Leverage these capabilities:"))
            .expect("capabilities line present");
        assert_eq!(line.matches(", ").count(), 4);
    }

    #[test]
    fn summary_names_agent_query_and_answered_questions_only() {
        let agent = agent_in(AgentCategory::Writing);
        let steps = generate_agent_questions("write release notes", agent);
        let mut answers = RefinementAnswers::new();
        answers.toggle("writing_tone", "professional");
        answers.toggle("writing_tone", "casual");

        let summary = build_refinement_summary("write release notes", agent, &answers, &steps);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], format!("Using **{}** to: \"write release notes\"", agent.name));
        assert_eq!(lines[1], "What tone? → Professional, Casual / Friendly");
        assert_eq!(lines.len(), 2, "unanswered questions are omitted");
    }
}
