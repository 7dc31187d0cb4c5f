//! Read-only view over the built-in agent catalog and tech-stack templates.
//!
//! The catalog ships embedded in the binary and is parsed once at first
//! access. Everything downstream (matching, stack recommendation, question
//! banks) borrows from the same snapshot.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::agent::{Agent, AgentId};
use crate::domain::stack::TechStack;

const CATALOG_TOML: &str = include_str!("../data/catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not parse catalog document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate agent id in catalog: `{0}`")]
    DuplicateAgentId(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    agents: Vec<Agent>,
    #[serde(default)]
    stacks: Vec<TechStack>,
}

impl Catalog {
    /// Parse and validate a catalog document. Agent ids must be unique;
    /// the question banks and review store key on them.
    pub fn parse(document: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(document)?;
        let mut seen = HashSet::new();
        for agent in &catalog.agents {
            if !seen.insert(agent.id.0.as_str()) {
                return Err(CatalogError::DuplicateAgentId(agent.id.0.clone()));
            }
        }
        Ok(catalog)
    }

    /// The embedded catalog snapshot. The embedded document is pinned by
    /// tests, so the parse here cannot fail at runtime.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::parse(CATALOG_TOML).expect("embedded catalog document is well-formed")
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn stacks(&self) -> &[TechStack] {
        &self.stacks
    }

    pub fn agent_by_id(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| &agent.id == id)
    }
}
