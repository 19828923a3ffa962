use axum::extract::State;
use axum::Json;
use unsaid_core::AnalysisError;
use unsaid_schema::{AnalysisResult, AnalyzeRequest};

use super::ApiError;
use crate::state::AppState;

pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    if body.conversation.trim().is_empty() {
        return Err(ApiError::bad_request("No conversation provided"));
    }

    let clients = state.clients().map_err(|e| {
        tracing::error!(error = %e, "analyze rejected");
        ApiError::internal("Gemini API key not configured")
    })?;

    match clients
        .analysis
        .analyze(&body.conversation, body.language)
        .await
    {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            match &e {
                AnalysisError::Shape(detail) => {
                    tracing::error!(detail = %detail, "analysis response failed shape check")
                }
                other => tracing::error!(error = %other, "analysis failed"),
            }
            Err(ApiError::internal("Analysis failed"))
        }
    }
}
