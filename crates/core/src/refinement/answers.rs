use std::collections::BTreeMap;

use serde::Serialize;

use crate::refinement::questions::valid_options;
use crate::sanitize::validate_refinement_answer;

/// Accumulated multi-select answers, keyed by question id. The map is
/// ordered by id so downstream rendering is deterministic across calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RefinementAnswers {
    selected: BTreeMap<String, Vec<String>>,
}

impl RefinementAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of `value` in the set for `question_id`. The value
    /// is validated against the question's whitelist first; an invalid value
    /// or unknown question id is a silent no-op, never an error.
    pub fn toggle(&mut self, question_id: &str, value: &str) {
        let allowed = valid_options(question_id);
        if !validate_refinement_answer(value, &allowed) {
            return;
        }

        let values = self.selected.entry(question_id.to_string()).or_default();
        match values.iter().position(|existing| existing == value) {
            Some(index) => {
                values.remove(index);
            }
            None => values.push(value.to_string()),
        }
        if values.is_empty() {
            self.selected.remove(question_id);
        }
    }

    /// Selected values for one question, insertion-ordered.
    pub fn values(&self, question_id: &str) -> &[String] {
        self.selected.get(question_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First selected value for one question, if any.
    pub fn first(&self, question_id: &str) -> Option<&str> {
        self.values(question_id).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.selected.iter().map(|(id, values)| (id.as_str(), values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
