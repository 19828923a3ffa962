//! Translation client and the per-session translation cache.
//!
//! Translation is itself a generative call against a smaller model, not a
//! deterministic re-render; the returned shape is enforced by the same
//! typed parse as the analysis path.

use std::collections::HashMap;
use std::sync::Arc;

use unsaid_provider::{GenerateRequest, GenerativeProvider};
use unsaid_schema::{AnalysisResult, Language};

use crate::coerce::parse_result;
use crate::error::AnalysisError;
use crate::prompts::build_translation_prompt;

const TRANSLATION_MODEL: &str = "gemini-2.5-flash";
const TRANSLATION_TEMPERATURE: f32 = 0.3;
const TRANSLATION_MAX_OUTPUT_TOKENS: u32 = 4096;

#[derive(Clone)]
pub struct TranslationClient {
    provider: Arc<dyn GenerativeProvider>,
}

impl TranslationClient {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    /// Re-render all string values of `result` in `target`, preserving the
    /// object's structure. One upstream call per invocation.
    pub async fn translate(
        &self,
        result: &AnalysisResult,
        target: Language,
    ) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(target = %target, "requesting translation");

        let response = self
            .provider
            .generate(GenerateRequest {
                model: TRANSLATION_MODEL.into(),
                prompt: build_translation_prompt(result, target)?,
                temperature: TRANSLATION_TEMPERATURE,
                max_output_tokens: TRANSLATION_MAX_OUTPUT_TOKENS,
            })
            .await?;

        parse_result(&response.text)
    }
}

/// Session-scoped mapping from language to a previously obtained result.
/// Seeded with the original-language result, filled lazily on language
/// switches, never invalidated.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    entries: HashMap<Language, AnalysisResult>,
}

impl TranslationCache {
    pub fn seeded(language: Language, result: AnalysisResult) -> Self {
        let mut entries = HashMap::new();
        entries.insert(language, result);
        Self { entries }
    }

    pub fn contains(&self, language: Language) -> bool {
        self.entries.contains_key(&language)
    }

    pub fn get(&self, language: Language) -> Option<&AnalysisResult> {
        self.entries.get(&language)
    }

    pub fn insert(&mut self, language: Language, result: AnalysisResult) {
        self.entries.insert(language, result);
    }
}
