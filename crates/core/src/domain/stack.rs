use serde::{Deserialize, Serialize};

/// A named recommendation for one layer of a stack, with the reason it fits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackChoice {
    pub name: String,
    pub reason: String,
}

/// A technology-stack template matched against build-intent queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub use_case: String,
    pub keywords: Vec<String>,
    pub frontend: StackChoice,
    pub backend: StackChoice,
    pub database: StackChoice,
    pub hosting: StackChoice,
}
