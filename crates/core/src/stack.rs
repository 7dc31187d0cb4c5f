//! Tech-stack recommendation for build-intent queries.

use crate::catalog::Catalog;
use crate::domain::stack::TechStack;
use crate::sanitize::sanitize_query;

/// Terms whose presence signals the user wants to construct software. The
/// recommender only applies to such queries.
const BUILD_INTENT_KEYWORDS: [&str; 16] = [
    "build",
    "create",
    "make",
    "develop",
    "website",
    "web",
    "app",
    "application",
    "platform",
    "site",
    "project",
    "saas",
    "tool",
    "startup",
    "mvp",
    "prototype",
];

const STACK_KEYWORD_POINTS: u32 = 2;

#[derive(Clone, Copy, Debug)]
pub struct StackRecommender<'a> {
    catalog: &'a Catalog,
}

impl StackRecommender<'static> {
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl<'a> StackRecommender<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Recommend at most one stack template. Non-build queries and empty
    /// queries yield `None`. A build-intent query matching no template
    /// keywords falls back to the first template in catalog order; that is
    /// the documented default, not an error.
    pub fn recommend_tech_stack(&self, raw_query: &str) -> Option<&'a TechStack> {
        let clean = sanitize_query(raw_query);
        if clean.is_empty() {
            return None;
        }

        let query = clean.to_lowercase();
        if !BUILD_INTENT_KEYWORDS.iter().any(|keyword| query.contains(keyword)) {
            return None;
        }

        let mut best: Option<&'a TechStack> = None;
        let mut best_score = 0;
        for stack in self.catalog.stacks() {
            let score: u32 = stack
                .keywords
                .iter()
                .filter(|keyword| query.contains(keyword.as_str()))
                .count() as u32
                * STACK_KEYWORD_POINTS;
            if score > best_score {
                best_score = score;
                best = Some(stack);
            }
        }

        best.or_else(|| self.catalog.stacks().first())
    }
}

#[cfg(test)]
mod tests {
    use super::StackRecommender;

    #[test]
    fn empty_query_gets_no_recommendation() {
        let recommender = StackRecommender::builtin();
        assert!(recommender.recommend_tech_stack("").is_none());
        assert!(recommender.recommend_tech_stack("   ").is_none());
    }

    #[test]
    fn non_build_query_gets_no_recommendation() {
        let recommender = StackRecommender::builtin();
        assert!(recommender.recommend_tech_stack("summarize this research paper").is_none());
    }

    #[test]
    fn saas_dashboard_query_matches_saas_template() {
        let recommender = StackRecommender::builtin();
        let stack = recommender
            .recommend_tech_stack("I want to build a SaaS dashboard with real-time analytics")
            .expect("build query recommends a stack");
        assert_eq!(stack.use_case, "SaaS Dashboard");
    }

    #[test]
    fn ecommerce_query_matches_store_template() {
        let recommender = StackRecommender::builtin();
        let stack = recommender
            .recommend_tech_stack("create an online store to sell products with a cart")
            .expect("build query recommends a stack");
        assert_eq!(stack.use_case, "E-Commerce Store");
    }

    #[test]
    fn build_intent_without_keyword_hits_falls_back_to_first_template() {
        let recommender = StackRecommender::builtin();
        let stack = recommender
            .recommend_tech_stack("build something nobody has thought of yet")
            .expect("build intent always yields a recommendation");
        assert_eq!(stack.use_case, "SaaS Dashboard");
    }
}
