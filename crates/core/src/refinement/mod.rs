//! Post-selection refinement: category-keyed follow-up questions and the
//! session state machine that turns answers into a customized prompt.

pub mod answers;
pub mod questions;
pub mod session;

pub use answers::RefinementAnswers;
pub use questions::{
    category_questions, generate_agent_questions, valid_options, QuestionOption,
    RefinementQuestion, RefinementStep, UNIVERSAL_QUESTIONS,
};
pub use session::{
    RefinementEvent, RefinementSession, RefinementStage, SessionError, TransitionError,
    TransitionOutcome,
};
