pub mod catalog;
pub mod config;
pub mod domain;
pub mod matching;
pub mod prompt;
pub mod refinement;
pub mod sanitize;
pub mod stack;

pub use catalog::{Catalog, CatalogError};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::agent::{AccessType, Agent, AgentCategory, AgentId, PricingModel};
pub use domain::history::SearchHistoryItem;
pub use domain::review::AgentReview;
pub use domain::stack::{StackChoice, TechStack};
pub use domain::template::SavedTemplate;
pub use matching::{confidence_pct, MatchEngine, MatchResult};
pub use prompt::{
    build_refinement_summary, generate_custom_prompt, generate_prompt, OutputPreference, TechLevel,
};
pub use refinement::{
    generate_agent_questions, valid_options, QuestionOption, RefinementAnswers, RefinementEvent,
    RefinementQuestion, RefinementSession, RefinementStage, RefinementStep, SessionError,
    TransitionError, TransitionOutcome,
};
pub use stack::StackRecommender;
