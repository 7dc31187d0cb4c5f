//! The refinement session state machine.
//!
//! One session covers one (query, agent) pair: question steps, a summary
//! stage, and a terminal prompt stage. Transitions are synchronous and
//! deterministic; invalid (stage, event) pairs are rejected without
//! changing state.

use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::agent::{Agent, AgentId};
use crate::prompt::{build_refinement_summary, generate_custom_prompt};
use crate::refinement::answers::RefinementAnswers;
use crate::refinement::questions::{generate_agent_questions, RefinementStep};
use crate::sanitize::sanitize_query;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefinementStage {
    /// Zero-based question step index.
    Question(usize),
    Summary,
    /// Terminal: the custom prompt has been generated and frozen.
    PromptReady,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefinementEvent {
    Continue,
    Back,
    Skip,
    Generate,
}

/// Result of a successful transition. `Exited` means the user backed out of
/// the first question; the session is over and the caller navigates away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Moved { from: RefinementStage, to: RefinementStage },
    Exited,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("event {event:?} is not valid in stage {stage:?}")]
    InvalidTransition { stage: RefinementStage, event: RefinementEvent },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("refinement requires a non-empty query")]
    EmptyQuery,
    #[error("unknown agent id `{0}`")]
    UnknownAgent(String),
}

/// Session state owned by the caller. All derived data (steps, answers,
/// frozen prompt) lives here; nothing is shared across sessions.
#[derive(Clone, Debug)]
pub struct RefinementSession<'a> {
    query: String,
    agent: &'a Agent,
    steps: Vec<RefinementStep>,
    answers: RefinementAnswers,
    stage: RefinementStage,
    prompt: Option<String>,
}

impl<'a> RefinementSession<'a> {
    /// Start a session for a query and an already-resolved agent. Fails when
    /// the query sanitizes to empty; there is nothing to refine.
    pub fn new(raw_query: &str, agent: &'a Agent) -> Result<Self, SessionError> {
        let query = sanitize_query(raw_query);
        if query.is_empty() {
            return Err(SessionError::EmptyQuery);
        }

        let steps = generate_agent_questions(&query, agent);
        Ok(Self {
            query,
            agent,
            steps,
            answers: RefinementAnswers::new(),
            stage: RefinementStage::Question(0),
            prompt: None,
        })
    }

    /// Start a session resolving the agent by id from a catalog.
    pub fn start(
        catalog: &'a Catalog,
        raw_query: &str,
        agent_id: &AgentId,
    ) -> Result<Self, SessionError> {
        let agent = catalog
            .agent_by_id(agent_id)
            .ok_or_else(|| SessionError::UnknownAgent(agent_id.0.clone()))?;
        Self::new(raw_query, agent)
    }

    pub fn stage(&self) -> RefinementStage {
        self.stage
    }

    pub fn agent(&self) -> &'a Agent {
        self.agent
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn steps(&self) -> &[RefinementStep] {
        &self.steps
    }

    pub fn answers(&self) -> &RefinementAnswers {
        &self.answers
    }

    /// The frozen prompt; `None` until the session reaches `PromptReady`.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// The step shown for the current stage, when it is a question stage.
    pub fn current_step(&self) -> Option<&RefinementStep> {
        match self.stage {
            RefinementStage::Question(index) => self.steps.get(index),
            _ => None,
        }
    }

    /// Toggle an answer value. Whitelist violations and unknown question ids
    /// are silent no-ops. Once the prompt is frozen the toggle still records,
    /// but the prompt does not change.
    pub fn toggle_answer(&mut self, question_id: &str, value: &str) {
        self.answers.toggle(question_id, value);
    }

    /// Human-readable recap of the query and every answered question.
    pub fn summary(&self) -> String {
        build_refinement_summary(&self.query, self.agent, &self.answers, &self.steps)
    }

    /// Apply one event. On error the session state is unchanged.
    pub fn apply(&mut self, event: RefinementEvent) -> Result<TransitionOutcome, TransitionError> {
        use RefinementEvent::{Back, Continue, Generate, Skip};
        use RefinementStage::{PromptReady, Question, Summary};

        let from = self.stage;
        let last_step = self.steps.len() - 1;

        let to = match (from, event) {
            (Question(index), Continue) if index < last_step => Question(index + 1),
            (Question(index), Continue) if index == last_step => Summary,
            (Question(0), Back) => return Ok(TransitionOutcome::Exited),
            (Question(index), Back) => Question(index - 1),
            (Summary, Back) => Question(last_step),
            (Summary, Generate) | (Question(_), Skip) => {
                self.freeze_prompt();
                PromptReady
            }
            _ => return Err(TransitionError::InvalidTransition { stage: from, event }),
        };

        self.stage = to;
        Ok(TransitionOutcome::Moved { from, to })
    }

    fn freeze_prompt(&mut self) {
        self.prompt =
            Some(generate_custom_prompt(&self.query, self.agent, &self.answers, &self.steps));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        RefinementEvent, RefinementSession, RefinementStage, SessionError, TransitionError,
        TransitionOutcome,
    };
    use crate::catalog::Catalog;
    use crate::domain::agent::{Agent, AgentCategory, AgentId};

    fn agent_in(category: AgentCategory) -> &'static Agent {
        Catalog::builtin()
            .agents()
            .iter()
            .find(|agent| agent.category == category)
            .expect("catalog covers every category used in tests")
    }

    #[test]
    fn session_requires_non_empty_query() {
        let agent = agent_in(AgentCategory::Writing);
        assert_eq!(
            RefinementSession::new("  <p></p>  ", agent).err(),
            Some(SessionError::EmptyQuery)
        );
    }

    #[test]
    fn session_requires_resolvable_agent() {
        let catalog = Catalog::builtin();
        let error = RefinementSession::start(catalog, "write a post", &AgentId("ghost".into()))
            .err()
            .expect("unknown agent must be rejected");
        assert_eq!(error, SessionError::UnknownAgent("ghost".to_string()));
    }

    #[test]
    fn full_walk_reaches_prompt_ready() {
        let agent = agent_in(AgentCategory::Writing);
        let mut session =
            RefinementSession::new("write a launch announcement", agent).expect("session starts");
        assert_eq!(session.stage(), RefinementStage::Question(0));
        assert_eq!(session.steps().len(), 2);

        session.apply(RefinementEvent::Continue).expect("question 0 -> question 1");
        assert_eq!(session.stage(), RefinementStage::Question(1));

        session.apply(RefinementEvent::Continue).expect("question 1 -> summary");
        assert_eq!(session.stage(), RefinementStage::Summary);
        assert!(session.prompt().is_none());

        session.apply(RefinementEvent::Generate).expect("summary -> prompt ready");
        assert_eq!(session.stage(), RefinementStage::PromptReady);
        assert!(session.prompt().is_some());
    }

    #[test]
    fn back_from_first_question_exits() {
        let agent = agent_in(AgentCategory::Chatbot);
        let mut session = RefinementSession::new("answer support tickets", agent).expect("starts");
        let outcome = session.apply(RefinementEvent::Back).expect("back is accepted");
        assert_eq!(outcome, TransitionOutcome::Exited);
        // The caller navigates away; the session itself did not advance.
        assert_eq!(session.stage(), RefinementStage::Question(0));
    }

    #[test]
    fn back_walks_one_step_at_a_time() {
        let agent = agent_in(AgentCategory::Design);
        let mut session = RefinementSession::new("design a logo", agent).expect("starts");
        session.apply(RefinementEvent::Continue).expect("to question 1");
        session.apply(RefinementEvent::Continue).expect("to summary");

        session.apply(RefinementEvent::Back).expect("summary -> last question");
        assert_eq!(session.stage(), RefinementStage::Question(1));
        session.apply(RefinementEvent::Back).expect("question 1 -> question 0");
        assert_eq!(session.stage(), RefinementStage::Question(0));
    }

    #[test]
    fn skip_jumps_to_prompt_ready_from_any_question() {
        let agent = agent_in(AgentCategory::Video);
        let mut session = RefinementSession::new("make a product demo video", agent).expect("ok");
        session.apply(RefinementEvent::Skip).expect("skip from first question");
        assert_eq!(session.stage(), RefinementStage::PromptReady);
        let prompt = session.prompt().expect("skip generates from accumulated answers");
        assert!(prompt.contains(session.agent().name.as_str()));
    }

    #[test]
    fn prompt_ready_is_terminal() {
        let agent = agent_in(AgentCategory::Audio);
        let mut session = RefinementSession::new("narrate an audiobook", agent).expect("ok");
        session.apply(RefinementEvent::Skip).expect("to prompt ready");

        for event in [
            RefinementEvent::Continue,
            RefinementEvent::Back,
            RefinementEvent::Skip,
            RefinementEvent::Generate,
        ] {
            let error = session.apply(event).expect_err("prompt ready accepts nothing");
            assert_eq!(
                error,
                TransitionError::InvalidTransition {
                    stage: RefinementStage::PromptReady,
                    event
                }
            );
            assert_eq!(session.stage(), RefinementStage::PromptReady);
        }
    }

    #[test]
    fn generate_is_only_valid_at_summary() {
        let agent = agent_in(AgentCategory::Automation);
        let mut session = RefinementSession::new("automate my inbox", agent).expect("ok");
        let error = session.apply(RefinementEvent::Generate).expect_err("not at summary yet");
        assert!(matches!(error, TransitionError::InvalidTransition { .. }));
        assert_eq!(session.stage(), RefinementStage::Question(0));
    }

    #[test]
    fn replay_is_deterministic_for_same_event_sequence() {
        let agent = agent_in(AgentCategory::DataAnalysis);
        let events =
            [RefinementEvent::Continue, RefinementEvent::Continue, RefinementEvent::Generate];

        let run = || {
            let mut session =
                RefinementSession::new("find trends in sales data", agent).expect("starts");
            session.toggle_answer("data_goal", "patterns");
            session.toggle_answer("tech_level", "expert");
            let mut stages = Vec::new();
            for event in events {
                session.apply(event).expect("deterministic walk");
                stages.push(session.stage());
            }
            (stages, session.prompt().map(str::to_string))
        };

        assert_eq!(run(), run());
    }
}
