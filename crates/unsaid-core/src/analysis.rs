//! Analysis client: one prompt, one upstream call, one typed result.

use std::sync::Arc;

use unsaid_provider::{GenerateRequest, GenerativeProvider};
use unsaid_schema::{AnalysisResult, Language};

use crate::coerce::parse_result;
use crate::error::AnalysisError;
use crate::prompts::build_analysis_prompt;

const ANALYSIS_MODEL: &str = "gemini-2.5-pro";
const ANALYSIS_TEMPERATURE: f32 = 0.7;
const ANALYSIS_MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Clone)]
pub struct AnalysisClient {
    provider: Arc<dyn GenerativeProvider>,
}

impl AnalysisClient {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    /// Issues exactly one upstream call. No retry, no backoff; any failure
    /// is returned to the caller as-is.
    pub async fn analyze(
        &self,
        conversation: &str,
        language: Language,
    ) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(
            language = %language,
            chars = conversation.len(),
            "requesting analysis"
        );

        let response = self
            .provider
            .generate(GenerateRequest {
                model: ANALYSIS_MODEL.into(),
                prompt: build_analysis_prompt(conversation, language),
                temperature: ANALYSIS_TEMPERATURE,
                max_output_tokens: ANALYSIS_MAX_OUTPUT_TOKENS,
            })
            .await?;

        parse_result(&response.text)
    }
}
