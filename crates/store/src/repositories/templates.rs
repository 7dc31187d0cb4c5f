use chrono::Utc;
use uuid::Uuid;

use agentscout_core::domain::template::{
    SavedTemplate, MAX_TEMPLATE_PROMPT_LEN, MAX_TEMPLATE_TITLE_LEN,
};
use agentscout_core::sanitize::sanitize_input;

use crate::kv::{KvStore, StoreError};
use crate::repositories::{decode_records, write_records};

const TEMPLATES_KEY: &str = "templates";
pub const MAX_SAVED_TEMPLATES: usize = 50;

/// Saved prompt templates, newest first.
#[derive(Clone, Debug)]
pub struct TemplateRepository<S> {
    store: S,
}

impl<S: KvStore> TemplateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Save one prompt under a title. The title is sanitized; the prompt
    /// body keeps its formatting and is only length-bounded. Empty title or
    /// prompt is silently skipped.
    pub fn save(&self, title: &str, prompt: &str, agent_name: &str) -> Result<(), StoreError> {
        let clean_title = sanitize_input(title, MAX_TEMPLATE_TITLE_LEN);
        let bounded_prompt: String = prompt.chars().take(MAX_TEMPLATE_PROMPT_LEN).collect();
        if clean_title.is_empty() || bounded_prompt.is_empty() {
            return Ok(());
        }

        let template = SavedTemplate {
            id: Uuid::new_v4().to_string(),
            title: clean_title,
            prompt: bounded_prompt,
            agent_name: agent_name.chars().take(200).collect(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let mut templates = self.list();
        templates.insert(0, template);
        templates.truncate(MAX_SAVED_TEMPLATES);
        write_records(&self.store, TEMPLATES_KEY, &templates)
    }

    pub fn list(&self) -> Vec<SavedTemplate> {
        decode_records(self.store.get(TEMPLATES_KEY), SavedTemplate::is_valid)
    }

    /// Delete one template by id. Unknown ids are a no-op.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut templates = self.list();
        templates.retain(|template| template.id != id);
        write_records(&self.store, TEMPLATES_KEY, &templates)
    }

    pub fn clear(&self) {
        self.store.remove(TEMPLATES_KEY);
    }
}
