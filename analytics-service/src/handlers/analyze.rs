//! The analysis endpoint: aggregate CRM data, ask Gemini, relay widgets.

use crate::dtos::AnalyzeRequest;
use crate::services::normalizer::extract_widget_payload;
use crate::services::prompt::{compose_context, SYSTEM_PROMPT};
use crate::services::providers::ProviderError;
use crate::session::SessionIdentity;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use thiserror::Error;
use validator::Validate;

/// The one error message surfaced to callers. Every fatal failure mode
/// (provider down, malformed model output, invalid question) collapses to
/// the same 500 body; only the logs distinguish them.
const ANALYSIS_ERROR_MESSAGE: &str = "Erro ao processar análise";

/// Fatal failures of the analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(#[from] validator::ValidationErrors),

    #[error("Provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model returned malformed JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Analysis request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": ANALYSIS_ERROR_MESSAGE,
                "widgets": []
            })),
        )
            .into_response()
    }
}

/// POST handler: session identity → data snapshot → prompt → Gemini →
/// normalized widget payload, relayed verbatim.
pub async fn analyze_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<Value>, AnalysisError> {
    payload.validate()?;

    let identity = SessionIdentity::from_jar(&jar);
    let user_id = identity.user_id();

    tracing::info!(user_id, "Running widget analysis");

    let snapshot = state.aggregator.fetch_snapshot(user_id).await;
    let context = compose_context(&snapshot, &payload.prompt);

    let raw = state
        .text_provider
        .generate(&[SYSTEM_PROMPT.to_string(), context])
        .await?;

    let widgets = extract_widget_payload(&raw)?;

    Ok(Json(widgets))
}
