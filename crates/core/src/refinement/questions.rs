//! The refinement question bank.
//!
//! Category questions are keyed by the closed [`AgentCategory`] enum, so the
//! bank is total by construction. Question ids are globally unique across
//! the whole bank, since answer maps are keyed by them.

use crate::domain::agent::{Agent, AgentCategory};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefinementQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [QuestionOption],
}

/// One screen of the refinement flow: a title and its questions. Built once
/// per session from the chosen agent's category, immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefinementStep {
    pub title: String,
    pub questions: Vec<RefinementQuestion>,
}

const fn option(label: &'static str, value: &'static str) -> QuestionOption {
    QuestionOption { label, value }
}

const CODE_ASSISTANT_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "code_task",
        text: "What do you need help with?",
        options: &[
            option("Writing new code", "write"),
            option("Debugging / Fixing", "debug"),
            option("Refactoring", "refactor"),
            option("Code review", "review"),
            option("Learning", "learn"),
        ],
    },
    RefinementQuestion {
        id: "code_lang",
        text: "Primary language or framework?",
        options: &[
            option("JavaScript / TypeScript", "js"),
            option("Python", "python"),
            option("Java / Kotlin", "java"),
            option("Go / Rust", "systems"),
            option("Other", "other"),
        ],
    },
    RefinementQuestion {
        id: "code_detail",
        text: "How detailed should the response be?",
        options: &[
            option("Quick answer", "brief"),
            option("Step-by-step explanation", "detailed"),
            option("Full implementation", "full"),
        ],
    },
];

const IMAGE_GENERATION_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "image_purpose",
        text: "What are the images for?",
        options: &[
            option("Marketing / Social media", "marketing"),
            option("Product / E-commerce", "product"),
            option("Art / Creative", "art"),
            option("UI / App assets", "ui"),
            option("Logo / Branding", "logo"),
        ],
    },
    RefinementQuestion {
        id: "image_style",
        text: "What style do you prefer?",
        options: &[
            option("Photorealistic", "photo"),
            option("Illustrated / Artistic", "artistic"),
            option("Minimalist / Clean", "minimal"),
            option("3D rendered", "3d"),
        ],
    },
    RefinementQuestion {
        id: "image_format",
        text: "What output do you need?",
        options: &[
            option("Single image", "single"),
            option("Multiple variations", "variations"),
            option("Image with edits", "edit"),
        ],
    },
];

const WRITING_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "writing_type",
        text: "What type of content?",
        options: &[
            option("Blog / Article", "blog"),
            option("Marketing copy", "marketing"),
            option("Technical docs", "technical"),
            option("Fiction / Creative", "fiction"),
            option("Email / Comms", "email"),
        ],
    },
    RefinementQuestion {
        id: "writing_tone",
        text: "What tone?",
        options: &[
            option("Professional", "professional"),
            option("Casual / Friendly", "casual"),
            option("Academic", "academic"),
            option("Witty / Creative", "creative"),
        ],
    },
    RefinementQuestion {
        id: "writing_length",
        text: "How long should the output be?",
        options: &[
            option("Short (< 200 words)", "short"),
            option("Medium (200-500 words)", "medium"),
            option("Long (500+ words)", "long"),
        ],
    },
];

const DATA_ANALYSIS_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "data_type",
        text: "What type of data are you working with?",
        options: &[
            option("CSV / Spreadsheet", "csv"),
            option("Database", "database"),
            option("Web data / Scraping", "web"),
            option("API data", "api"),
            option("Research papers", "research"),
        ],
    },
    RefinementQuestion {
        id: "data_goal",
        text: "What is your goal?",
        options: &[
            option("Find patterns / Insights", "patterns"),
            option("Build a report", "report"),
            option("Compare datasets", "compare"),
            option("Get a summary", "summary"),
        ],
    },
    RefinementQuestion {
        id: "data_output",
        text: "What format do you want the result in?",
        options: &[
            option("Bullet points", "bullets"),
            option("Paragraph summary", "paragraph"),
            option("Code / Script", "code"),
            option("Table / Chart", "table"),
        ],
    },
];

const WEB_BUILDING_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "web_type",
        text: "What are you building?",
        options: &[
            option("Landing page", "landing"),
            option("Full web app", "webapp"),
            option("E-commerce store", "ecommerce"),
            option("Portfolio / Blog", "portfolio"),
            option("SaaS dashboard", "saas"),
        ],
    },
    RefinementQuestion {
        id: "web_backend",
        text: "Do you need backend support?",
        options: &[
            option("Yes, real-time data", "realtime"),
            option("Yes, simple API", "api"),
            option("No, frontend only", "frontend"),
        ],
    },
    RefinementQuestion {
        id: "web_deploy",
        text: "Where will you deploy?",
        options: &[
            option("Vercel / Netlify", "vercel"),
            option("AWS / GCP", "cloud"),
            option("Self-hosted", "self"),
            option("Not sure yet", "unsure"),
        ],
    },
];

const VIDEO_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "video_type",
        text: "What type of video?",
        options: &[
            option("Short clips / Social", "short"),
            option("Explainer / Tutorial", "explainer"),
            option("Product demo", "demo"),
            option("Cinematic / Creative", "cinematic"),
            option("Avatar / Talking head", "avatar"),
        ],
    },
    RefinementQuestion {
        id: "video_length",
        text: "How long?",
        options: &[
            option("Under 30 seconds", "short"),
            option("1-3 minutes", "medium"),
            option("5+ minutes", "long"),
        ],
    },
];

const AUDIO_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "audio_type",
        text: "What audio do you need?",
        options: &[
            option("Voice / Text-to-speech", "voice"),
            option("Music / Songs", "music"),
            option("Podcast editing", "podcast"),
            option("Sound effects", "sfx"),
        ],
    },
    RefinementQuestion {
        id: "audio_quality",
        text: "Quality level?",
        options: &[option("Draft / Quick", "draft"), option("Professional", "professional")],
    },
];

const CHATBOT_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "bot_purpose",
        text: "What is the chatbot for?",
        options: &[
            option("Customer support", "support"),
            option("Internal assistant", "internal"),
            option("Lead generation", "leadgen"),
            option("General Q&A", "general"),
        ],
    },
    RefinementQuestion {
        id: "bot_tone",
        text: "What tone should the bot use?",
        options: &[
            option("Professional", "professional"),
            option("Friendly / Casual", "casual"),
            option("Technical", "technical"),
        ],
    },
];

const AUTOMATION_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "auto_complexity",
        text: "How complex is the workflow?",
        options: &[
            option("Simple (2-3 steps)", "simple"),
            option("Moderate (branching)", "moderate"),
            option("Complex (API + data)", "complex"),
        ],
    },
    RefinementQuestion {
        id: "auto_tools",
        text: "What tools are involved?",
        options: &[
            option("Email / Calendar", "email"),
            option("CRM / Sales tools", "crm"),
            option("Databases / Spreadsheets", "data"),
            option("APIs / Webhooks", "api"),
        ],
    },
];

const DESIGN_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "design_task",
        text: "What design task?",
        options: &[
            option("UI mockups", "ui"),
            option("Wireframing", "wireframe"),
            option("Branding / Color", "branding"),
            option("UX research", "ux"),
        ],
    },
    RefinementQuestion {
        id: "design_format",
        text: "What deliverable do you need?",
        options: &[
            option("Visual mockup", "mockup"),
            option("Written guidelines", "guidelines"),
            option("Color palette / System", "palette"),
        ],
    },
];

/// Universal questions asked for every agent, always the final step.
pub const UNIVERSAL_QUESTIONS: &[RefinementQuestion] = &[
    RefinementQuestion {
        id: "tech_level",
        text: "What's your technical level?",
        options: &[
            option("Beginner", "beginner"),
            option("Intermediate", "intermediate"),
            option("Expert", "expert"),
        ],
    },
    RefinementQuestion {
        id: "output_pref",
        text: "How should the output be structured?",
        options: &[
            option("Step-by-step guide", "steps"),
            option("Concise summary", "summary"),
            option("Detailed deep-dive", "detailed"),
            option("Ready-to-use template", "template"),
        ],
    },
];

/// Category-specific questions. Total over the closed category set.
pub fn category_questions(category: AgentCategory) -> &'static [RefinementQuestion] {
    match category {
        AgentCategory::CodeAssistant => CODE_ASSISTANT_QUESTIONS,
        AgentCategory::ImageGeneration => IMAGE_GENERATION_QUESTIONS,
        AgentCategory::Writing => WRITING_QUESTIONS,
        AgentCategory::DataAnalysis => DATA_ANALYSIS_QUESTIONS,
        AgentCategory::WebBuilding => WEB_BUILDING_QUESTIONS,
        AgentCategory::Video => VIDEO_QUESTIONS,
        AgentCategory::Audio => AUDIO_QUESTIONS,
        AgentCategory::Chatbot => CHATBOT_QUESTIONS,
        AgentCategory::Automation => AUTOMATION_QUESTIONS,
        AgentCategory::Design => DESIGN_QUESTIONS,
    }
}

/// Build the steps for one refinement session: the category step (omitted
/// when a category has no questions), then the universal preferences step.
pub fn generate_agent_questions(_query: &str, agent: &Agent) -> Vec<RefinementStep> {
    let mut steps = Vec::new();

    let bank = category_questions(agent.category);
    if !bank.is_empty() {
        steps.push(RefinementStep {
            title: format!("Customize for {}", agent.name),
            questions: bank.iter().copied().take(3).collect(),
        });
    }

    steps.push(RefinementStep {
        title: "Your preferences".to_string(),
        questions: UNIVERSAL_QUESTIONS.to_vec(),
    });

    steps
}

/// Option values offered for a question id: category banks first, then the
/// universal list. Unknown ids yield an empty whitelist.
pub fn valid_options(question_id: &str) -> Vec<&'static str> {
    for category in AgentCategory::ALL {
        for question in category_questions(category) {
            if question.id == question_id {
                return question.options.iter().map(|o| o.value).collect();
            }
        }
    }
    for question in UNIVERSAL_QUESTIONS {
        if question.id == question_id {
            return question.options.iter().map(|o| o.value).collect();
        }
    }
    Vec::new()
}
