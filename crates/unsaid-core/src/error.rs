use thiserror::Error;

use unsaid_provider::ProviderError;

use crate::flow::FlowState;
use crate::payment::PaymentError;

/// Failure modes of the analysis and translation clients. Upstream and
/// malformed-body failures collapse to the same user-facing message; the
/// variants exist so the server can log what actually went wrong.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No API credential was configured for the upstream service.
    #[error("api key not configured")]
    MissingCredential,
    /// The upstream call itself failed (transport, non-2xx, empty body).
    #[error("upstream generation failed: {0}")]
    Upstream(#[from] ProviderError),
    /// The response text is not JSON even after stripping code fences.
    #[error("response is not valid json: {0}")]
    Malformed(String),
    /// The response parsed as JSON but is missing required fields.
    #[error("response shape invalid: {0}")]
    Shape(String),
}

/// Failure modes of the flow controller.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("event '{event}' is not allowed in state {state:?}")]
    InvalidTransition {
        state: FlowState,
        event: &'static str,
    },
    /// The uploaded file does not look like an exported chat transcript.
    #[error("file does not look like a chat export")]
    InvalidExport,
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl FlowError {
    pub(crate) fn invalid(event: &'static str, state: FlowState) -> Self {
        FlowError::InvalidTransition { state, event }
    }
}
