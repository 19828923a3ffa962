use axum::extract::State;
use axum::Json;
use unsaid_schema::{AnalysisResult, TranslateRequest};

use super::ApiError;
use crate::state::AppState;

pub async fn translate(
    State(state): State<AppState>,
    Json(body): Json<TranslateRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let clients = state.clients().map_err(|e| {
        tracing::error!(error = %e, "translate rejected");
        ApiError::internal("Gemini API key not configured")
    })?;

    match clients
        .translation
        .translate(&body.result, body.target_language)
        .await
    {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!(error = %e, "translation failed");
            Err(ApiError::internal("Translation failed"))
        }
    }
}
