//! Input sanitization and validation.
//!
//! Every piece of free text entering the engine passes through
//! [`sanitize_input`] first: markup stripped, whitespace collapsed, length
//! bounded. Sanitization never fails; validators return a user-facing
//! message on rejection and `None` on success.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::domain::agent::PricingModel;

pub const MAX_QUERY_LEN: usize = 500;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_SIGNUP_PASSWORD_LEN: usize = 8;
pub const MAX_URL_LEN: usize = 2048;
pub const MAX_REVIEW_LEN: usize = 300;
pub const MAX_DESCRIPTION_LEN: usize = 500;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static tag pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("static email pattern")
    })
}

/// Strip tag-like substrings, collapse whitespace runs, trim, and bound the
/// length. Idempotent: applying it twice yields the same string.
pub fn sanitize_input(input: &str, max_len: usize) -> String {
    let stripped = tag_pattern().replace_all(input, "");
    let collapsed = whitespace_pattern().replace_all(&stripped, " ");
    let truncated: String = collapsed.trim().chars().take(max_len).collect();
    // Char truncation can expose a trailing space; drop it so the result is
    // a fixed point of this function.
    truncated.trim_end().to_string()
}

/// Sanitize a search query with the standard query bound.
pub fn sanitize_query(query: &str) -> String {
    sanitize_input(query, MAX_QUERY_LEN)
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required");
    }
    if trimmed.chars().count() > MAX_EMAIL_LEN {
        return Some("Email is too long");
    }
    if !email_pattern().is_match(trimmed) {
        return Some("Invalid email format");
    }
    None
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if len == 0 {
        return Some("Password is required");
    }
    if len < MIN_PASSWORD_LEN {
        return Some("Password must be at least 6 characters");
    }
    if len > MAX_PASSWORD_LEN {
        return Some("Password must be at most 128 characters");
    }
    None
}

/// Signup requires more than the base length window: at least 8 characters,
/// one uppercase letter, and one digit.
pub fn validate_signup_password(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if len == 0 {
        return Some("Password is required");
    }
    if len < MIN_SIGNUP_PASSWORD_LEN {
        return Some("Password must be at least 8 characters");
    }
    if len > MAX_PASSWORD_LEN {
        return Some("Password must be at most 128 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain a digit");
    }
    None
}

pub fn validate_name(name: &str) -> Option<&'static str> {
    if sanitize_input(name, MAX_NAME_LEN).is_empty() {
        return Some("Name is required");
    }
    None
}

pub fn validate_url(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some("URL is required");
    }
    if trimmed.chars().count() > MAX_URL_LEN {
        return Some("URL is too long");
    }
    match Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => None,
        Ok(_) => Some("URL must use http or https"),
        Err(_) => Some("Invalid URL format"),
    }
}

pub fn validate_rating(value: i64) -> Option<&'static str> {
    if !(1..=5).contains(&value) {
        return Some("Rating must be between 1 and 5");
    }
    None
}

/// Sanitize review text and check the minimum length. Returns the sanitized
/// text so callers store exactly what was validated.
pub fn validate_review(text: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_input(text, MAX_REVIEW_LEN);
    if sanitized.chars().count() < 3 {
        return Err("Review must be at least 3 characters");
    }
    Ok(sanitized)
}

/// Whitelist check for refinement answers: a value not offered for the
/// question is rejected outright.
pub fn validate_refinement_answer(answer: &str, allowed: &[&str]) -> bool {
    allowed.contains(&answer)
}

/// An agent submission form as entered by the user, before validation.
#[derive(Clone, Debug, Default)]
pub struct AgentSubmission {
    pub name: String,
    pub description: String,
    pub category: String,
    pub pricing_model: Option<String>,
    pub link: Option<String>,
}

/// Field-level validation of an agent submission. An empty map means the
/// submission is acceptable.
pub fn validate_agent_submission(
    submission: &AgentSubmission,
) -> BTreeMap<&'static str, &'static str> {
    let mut errors = BTreeMap::new();

    if submission.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    } else if submission.name.chars().count() > MAX_NAME_LEN {
        errors.insert("name", "Name must be at most 100 characters");
    }

    if submission.description.trim().is_empty() {
        errors.insert("description", "Description is required");
    } else if submission.description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.insert("description", "Description must be at most 500 characters");
    }

    if submission.category.trim().is_empty() {
        errors.insert("category", "Category is required");
    }

    if let Some(pricing) = submission.pricing_model.as_deref() {
        if PricingModel::from_label(pricing).is_none() {
            errors.insert("pricing_model", "Invalid pricing model");
        }
    }

    if let Some(link) = submission.link.as_deref() {
        if let Some(error) = validate_url(link) {
            errors.insert("link", error);
        }
    }

    errors
}
