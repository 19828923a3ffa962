pub mod gemini;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiProvider;

/// A single text-in, text-out generation request. The prompt already carries
/// both the instruction block and the user content; the upstream API sees
/// one part.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure: connect, timeout, or a broken body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Upstream answered with a non-2xx status.
    #[error("api error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Upstream answered 200 but carried no usable text.
    #[error("empty response: no candidate text")]
    EmptyResponse,
}

#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ProviderError>;
}

/// In-memory provider for tests: returns a fixed body and counts calls so
/// callers can assert exactly how many upstream requests were issued.
pub struct StubProvider {
    response: String,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeProvider for StubProvider {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerateResponse {
            text: self.response.clone(),
            input_tokens: None,
            output_tokens: None,
            finish_reason: Some("STOP".into()),
        })
    }
}
