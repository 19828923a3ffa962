use std::sync::Arc;

use unsaid_core::{AnalysisClient, AnalysisError, TranslationClient};
use unsaid_provider::{GeminiProvider, GenerativeProvider};

/// Clients shared by all route handlers. Both ride the same provider; the
/// analysis/translation split is a matter of model and prompt.
pub struct ServiceClients {
    pub analysis: AnalysisClient,
    pub translation: TranslationClient,
}

#[derive(Clone)]
pub struct AppState {
    clients: Option<Arc<ServiceClients>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            clients: Some(Arc::new(ServiceClients {
                analysis: AnalysisClient::new(provider.clone()),
                translation: TranslationClient::new(provider),
            })),
        }
    }

    /// Build from `GEMINI_API_KEY`. A missing key is tolerated at startup;
    /// every endpoint then answers 500 until the process is restarted with
    /// a credential.
    pub fn from_env() -> Self {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Self::new(Arc::new(GeminiProvider::new(key))),
            _ => {
                tracing::warn!("GEMINI_API_KEY not set; api endpoints will answer 500");
                Self::unconfigured()
            }
        }
    }

    pub fn unconfigured() -> Self {
        Self { clients: None }
    }

    pub fn clients(&self) -> Result<&Arc<ServiceClients>, AnalysisError> {
        self.clients
            .as_ref()
            .ok_or(AnalysisError::MissingCredential)
    }
}
