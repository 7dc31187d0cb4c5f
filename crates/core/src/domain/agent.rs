use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Closed set of catalog categories. The refinement question bank is keyed
/// by this enum, so adding a variant requires extending the bank as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentCategory {
    #[serde(rename = "Code Assistant")]
    CodeAssistant,
    #[serde(rename = "Image Generation")]
    ImageGeneration,
    #[serde(rename = "Writing")]
    Writing,
    #[serde(rename = "Data Analysis")]
    DataAnalysis,
    #[serde(rename = "Web Building")]
    WebBuilding,
    #[serde(rename = "Video")]
    Video,
    #[serde(rename = "Audio")]
    Audio,
    #[serde(rename = "Chatbot")]
    Chatbot,
    #[serde(rename = "Automation")]
    Automation,
    #[serde(rename = "Design")]
    Design,
}

impl AgentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AgentCategory::CodeAssistant => "Code Assistant",
            AgentCategory::ImageGeneration => "Image Generation",
            AgentCategory::Writing => "Writing",
            AgentCategory::DataAnalysis => "Data Analysis",
            AgentCategory::WebBuilding => "Web Building",
            AgentCategory::Video => "Video",
            AgentCategory::Audio => "Audio",
            AgentCategory::Chatbot => "Chatbot",
            AgentCategory::Automation => "Automation",
            AgentCategory::Design => "Design",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        AgentCategory::ALL.iter().copied().find(|category| category.label() == label)
    }

    pub const ALL: [AgentCategory; 10] = [
        AgentCategory::CodeAssistant,
        AgentCategory::ImageGeneration,
        AgentCategory::Writing,
        AgentCategory::DataAnalysis,
        AgentCategory::WebBuilding,
        AgentCategory::Video,
        AgentCategory::Audio,
        AgentCategory::Chatbot,
        AgentCategory::Automation,
        AgentCategory::Design,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    Free,
    Freemium,
    UsageBased,
    Subscription,
}

impl PricingModel {
    pub fn label(&self) -> &'static str {
        match self {
            PricingModel::Free => "free",
            PricingModel::Freemium => "freemium",
            PricingModel::UsageBased => "usage-based",
            PricingModel::Subscription => "subscription",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "free" => Some(PricingModel::Free),
            "freemium" => Some(PricingModel::Freemium),
            "usage-based" => Some(PricingModel::UsageBased),
            "subscription" => Some(PricingModel::Subscription),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessType {
    Api,
    Browser,
    OpenSource,
    Hybrid,
}

/// One catalog entry describing an AI tool/service. Immutable once loaded;
/// ids are unique across the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub category: AgentCategory,
    pub description: String,
    pub keywords: Vec<String>,
    pub capabilities: Vec<String>,
    pub best_for: Vec<String>,
    pub pricing: String,
    pub pricing_model: PricingModel,
    pub access: AccessType,
    pub rating: f64,
    pub review_count: u32,
    pub verified: bool,
    pub sandbox: bool,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    pub link: String,
    #[serde(default)]
    pub trending: bool,
}
