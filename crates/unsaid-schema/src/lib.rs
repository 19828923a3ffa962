use serde::{Deserialize, Serialize};

/// Display/analysis language. Drives both which prompt variant is used and
/// which natural language the model is asked to answer in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    He,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::He => "he",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "he" => Ok(Language::He),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// Who leads and who follows in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerDynamics {
    pub leader: String,
    pub follower: String,
    pub analysis: String,
}

/// Which side carries the higher emotional stake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalInvestment {
    pub more_invested: String,
    pub analysis: String,
}

/// What repeated, what shifted, what never materialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patterns {
    pub repeated: String,
    pub changed: String,
    pub never_came: String,
}

/// Topics dodged, implied, or silently shared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Unsaid {
    pub avoided: String,
    pub implied: String,
    pub known: String,
}

/// The full analysis produced by the model. All four sections are required;
/// deserializing into this type is the shape check, so a response missing
/// any section or leaf fails to parse instead of surfacing later during
/// rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub power_dynamics: PowerDynamics,
    pub emotional_investment: EmotionalInvestment,
    pub patterns: Patterns,
    pub unsaid: Unsaid,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub conversation: String,
    #[serde(default)]
    pub language: Language,
}

/// Body of `POST /api/translate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub result: AnalysisResult,
    pub target_language: Language,
}

/// Plain-text error field returned alongside a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
