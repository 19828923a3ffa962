//! The linear user journey as an explicit state machine.
//!
//! LANDING → PRIMING → GUIDE → UPLOAD → PAYMENT → PROCESSING → RESULT,
//! with PRIMING→LANDING (back) and RESULT→LANDING (analyze another) as the
//! only backward edges. The controller exclusively owns the in-flight
//! conversation, the current result, and the translation cache; callers get
//! read-only views. Nothing survives a new controller: refresh starts over
//! at LANDING.

use std::sync::Arc;

use unsaid_schema::{AnalysisResult, Language};

use crate::analysis::AnalysisClient;
use crate::error::FlowError;
use crate::export::{is_export_file_name, is_likely_export};
use crate::payment::{PaymentGate, PaymentReceipt};
use crate::translation::{TranslationCache, TranslationClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Landing,
    Priming,
    Guide,
    Upload,
    Payment,
    Processing,
    Result,
}

pub struct FlowController {
    analysis: AnalysisClient,
    translation: TranslationClient,
    payment: Arc<dyn PaymentGate>,
    state: FlowState,
    language: Language,
    conversation: Option<String>,
    result: Option<AnalysisResult>,
    cache: Option<TranslationCache>,
}

impl FlowController {
    pub fn new(
        analysis: AnalysisClient,
        translation: TranslationClient,
        payment: Arc<dyn PaymentGate>,
        language: Language,
    ) -> Self {
        Self {
            analysis,
            translation,
            payment,
            state: FlowState::Landing,
            language,
            conversation: None,
            result: None,
            cache: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The currently displayed result, if the flow has produced one.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    fn expect_state(&self, expected: FlowState, event: &'static str) -> Result<(), FlowError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FlowError::invalid(event, self.state))
        }
    }

    pub fn start(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::Landing, "start")?;
        self.state = FlowState::Priming;
        Ok(())
    }

    pub fn continue_to_guide(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::Priming, "continue")?;
        self.state = FlowState::Guide;
        Ok(())
    }

    pub fn back_to_landing(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::Priming, "back")?;
        self.state = FlowState::Landing;
        Ok(())
    }

    pub fn ready_to_upload(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::Guide, "ready")?;
        self.state = FlowState::Upload;
        Ok(())
    }

    /// Validate an uploaded export. On success the conversation is stored
    /// and the flow advances to PAYMENT; on failure the flow stays at
    /// UPLOAD so the user can retry.
    pub fn upload(&mut self, file_name: &str, content: &str) -> Result<(), FlowError> {
        self.expect_state(FlowState::Upload, "file validated")?;
        if !is_export_file_name(file_name) || !is_likely_export(content) {
            return Err(FlowError::InvalidExport);
        }
        self.conversation = Some(content.to_string());
        self.state = FlowState::Payment;
        Ok(())
    }

    /// Await the injected payment gate. Only an authorized payment unlocks
    /// the analysis call.
    pub async fn authorize_payment(&mut self) -> Result<PaymentReceipt, FlowError> {
        self.expect_state(FlowState::Payment, "payment resolved")?;
        let receipt = self.payment.authorize().await?;
        tracing::info!(reference = %receipt.reference, "payment authorized");
        self.state = FlowState::Processing;
        Ok(receipt)
    }

    /// Run the single analysis call. On success the flow advances to RESULT
    /// and the cache is seeded with the original-language result; on
    /// failure the error is surfaced and the flow remains at PROCESSING so
    /// the call can be re-attempted.
    pub async fn run_analysis(&mut self) -> Result<&AnalysisResult, FlowError> {
        self.expect_state(FlowState::Processing, "analysis resolved")?;
        let Some(conversation) = self.conversation.as_deref() else {
            return Err(FlowError::invalid("analysis resolved", self.state));
        };

        let result = self.analysis.analyze(conversation, self.language).await?;

        self.cache = Some(TranslationCache::seeded(self.language, result.clone()));
        self.state = FlowState::Result;
        Ok(self.result.insert(result))
    }

    /// Switch the display language. Outside RESULT this only records the
    /// preference. In RESULT a cache hit swaps the displayed result with no
    /// upstream call; a miss issues exactly one translation call. On
    /// translation failure the previously displayed result is retained.
    pub async fn set_language(
        &mut self,
        language: Language,
    ) -> Result<Option<AnalysisResult>, FlowError> {
        self.language = language;
        if self.state != FlowState::Result {
            return Ok(None);
        }

        let cached = self.cache.as_ref().is_some_and(|c| c.contains(language));
        if !cached {
            let Some(base) = self.result.clone() else {
                return Err(FlowError::invalid("language change", self.state));
            };
            let translated = self.translation.translate(&base, language).await?;
            if let Some(cache) = self.cache.as_mut() {
                cache.insert(language, translated);
            }
        }

        let shown = self.cache.as_ref().and_then(|c| c.get(language)).cloned();
        if let Some(result) = &shown {
            self.result = Some(result.clone());
        }
        Ok(shown)
    }

    /// Start over. Clears the conversation, the result, and the cache.
    pub fn analyze_another(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::Result, "analyze another")?;
        self.conversation = None;
        self.result = None;
        self.cache = None;
        self.state = FlowState::Landing;
        Ok(())
    }
}
