//! End-to-end journeys through the flow controller, driven on stub
//! providers so call counts can be asserted exactly.

use std::sync::Arc;

use async_trait::async_trait;
use unsaid_core::{
    AnalysisClient, FlowController, FlowError, FlowState, MockPaymentGate, TranslationClient,
};
use unsaid_provider::{GenerateRequest, GenerateResponse, GenerativeProvider, ProviderError};
use unsaid_schema::Language;

const FULL_RESULT: &str = r#"{
    "powerDynamics": {
        "leader": "Alice",
        "follower": "Bob",
        "analysis": "Alice initiates and sets the pace."
    },
    "emotionalInvestment": {
        "moreInvested": "Bob",
        "analysis": "Bob replies faster and at greater length."
    },
    "patterns": {
        "repeated": "Late night conversations",
        "changed": "Enthusiasm faded over weeks",
        "neverCame": "The plans they discussed"
    },
    "unsaid": {
        "avoided": "Defining the relationship",
        "implied": "Doubt about availability",
        "known": "Incompatible expectations"
    }
}"#;

const VALID_EXPORT: &str = "[12/05/2023, 14:30] Alice: hi\n[12/05/2023, 14:31] Bob: hey";

/// Always fails with an upstream 500, counting attempts.
struct FailingProvider {
    calls: std::sync::atomic::AtomicUsize,
}

impl FailingProvider {
    fn new() -> Self {
        Self {
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeProvider for FailingProvider {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(ProviderError::Api {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "upstream exploded".into(),
        })
    }
}

/// Succeeds on the first call, then fails every call after it. Lets a flow
/// reach RESULT and then watch a translation go wrong.
struct FirstCallOnlyProvider {
    calls: std::sync::atomic::AtomicUsize,
}

impl FirstCallOnlyProvider {
    fn new() -> Self {
        Self {
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerativeProvider for FirstCallOnlyProvider {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        let n = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if n > 0 {
            return Err(ProviderError::Api {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "overloaded".into(),
            });
        }
        Ok(GenerateResponse {
            text: FULL_RESULT.into(),
            input_tokens: None,
            output_tokens: None,
            finish_reason: Some("STOP".into()),
        })
    }
}

fn controller_with(provider: Arc<dyn GenerativeProvider>) -> FlowController {
    FlowController::new(
        AnalysisClient::new(provider.clone()),
        TranslationClient::new(provider),
        Arc::new(MockPaymentGate::instant()),
        Language::En,
    )
}

fn advance_to_upload(flow: &mut FlowController) {
    flow.start().unwrap();
    flow.continue_to_guide().unwrap();
    flow.ready_to_upload().unwrap();
}

#[tokio::test]
async fn invalid_file_keeps_flow_at_upload() {
    let provider = Arc::new(unsaid_provider::StubProvider::new(FULL_RESULT));
    let mut flow = controller_with(provider.clone());
    advance_to_upload(&mut flow);

    let err = flow.upload("chat.txt", "random text").unwrap_err();
    assert!(matches!(err, FlowError::InvalidExport));
    assert_eq!(flow.state(), FlowState::Upload);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn valid_file_runs_one_analysis_and_reaches_result() {
    let provider = Arc::new(unsaid_provider::StubProvider::new(FULL_RESULT));
    let mut flow = controller_with(provider.clone());
    advance_to_upload(&mut flow);

    flow.upload("chat.txt", VALID_EXPORT).unwrap();
    assert_eq!(flow.state(), FlowState::Payment);

    flow.authorize_payment().await.unwrap();
    assert_eq!(flow.state(), FlowState::Processing);

    let result = flow.run_analysis().await.unwrap();
    assert_eq!(result.power_dynamics.leader, "Alice");
    assert_eq!(result.unsaid.known, "Incompatible expectations");
    assert_eq!(flow.state(), FlowState::Result);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn failed_analysis_does_not_advance_to_result() {
    let provider = Arc::new(FailingProvider::new());
    let mut flow = controller_with(provider.clone());
    advance_to_upload(&mut flow);
    flow.upload("chat.txt", VALID_EXPORT).unwrap();
    flow.authorize_payment().await.unwrap();

    let err = flow.run_analysis().await.unwrap_err();
    assert!(matches!(err, FlowError::Analysis(_)));
    assert_eq!(flow.state(), FlowState::Processing);
    assert!(flow.result().is_none());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn language_switch_translates_once_then_serves_from_cache() {
    let provider = Arc::new(unsaid_provider::StubProvider::new(FULL_RESULT));
    let mut flow = controller_with(provider.clone());
    advance_to_upload(&mut flow);
    flow.upload("chat.txt", VALID_EXPORT).unwrap();
    flow.authorize_payment().await.unwrap();
    flow.run_analysis().await.unwrap();
    assert_eq!(provider.call_count(), 1);

    // Cache miss: exactly one translation call.
    let shown = flow.set_language(Language::He).await.unwrap();
    assert!(shown.is_some());
    assert_eq!(provider.call_count(), 2);

    // Switching back to the original language is a pure cache hit.
    flow.set_language(Language::En).await.unwrap();
    assert_eq!(provider.call_count(), 2);

    // Re-requesting the translated language must not call upstream again.
    flow.set_language(Language::He).await.unwrap();
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn failed_translation_retains_displayed_result() {
    let provider = Arc::new(FirstCallOnlyProvider::new());
    let mut flow = controller_with(provider);
    advance_to_upload(&mut flow);
    flow.upload("chat.txt", VALID_EXPORT).unwrap();
    flow.authorize_payment().await.unwrap();
    flow.run_analysis().await.unwrap();
    assert_eq!(flow.state(), FlowState::Result);

    let err = flow.set_language(Language::He).await.unwrap_err();
    assert!(matches!(err, FlowError::Analysis(_)));

    // The flow stays at RESULT and keeps showing the original-language
    // analysis; only the cache entry for the failed language is absent.
    assert_eq!(flow.state(), FlowState::Result);
    let shown = flow.result().unwrap();
    assert_eq!(shown.power_dynamics.leader, "Alice");

    // Switching back to the original language is still a pure cache hit.
    let shown = flow.set_language(Language::En).await.unwrap().unwrap();
    assert_eq!(shown.power_dynamics.leader, "Alice");
}

#[tokio::test]
async fn analyze_another_resets_to_landing_and_clears_state() {
    let provider = Arc::new(unsaid_provider::StubProvider::new(FULL_RESULT));
    let mut flow = controller_with(provider);
    advance_to_upload(&mut flow);
    flow.upload("chat.txt", VALID_EXPORT).unwrap();
    flow.authorize_payment().await.unwrap();
    flow.run_analysis().await.unwrap();

    flow.analyze_another().unwrap();
    assert_eq!(flow.state(), FlowState::Landing);
    assert!(flow.result().is_none());
}
