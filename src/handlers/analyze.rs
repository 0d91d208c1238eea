// ---------------------------------------------------------------------------
// handlers/analyze.rs — POST /analyze/
// ---------------------------------------------------------------------------

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use super::ApiError;
use crate::analyzer::{self, score};
use crate::models::{AnalyzeRequest, AnalyzeResponse, ErrorResponse};
use crate::state::AppState;

/// POST /analyze/ — run the impact analysis for one URL.
///
/// The body is parsed by hand rather than through `Json<...>` so malformed
/// JSON gets the same flat French error body as every other rejection, and
/// an empty body reads as an empty request.
#[utoipa::path(post, path = "/analyze/", tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Grade, advice and raw metrics", body = AnalyzeResponse),
        (status = 400, description = "Invalid input or unanalyzable site", body = ErrorResponse)
    )
)]
pub async fn analyze_site(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request: AnalyzeRequest = if body.is_empty() {
        AnalyzeRequest { url: String::new() }
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| ApiError::BadRequest("Payload JSON invalide.".to_string()))?
    };

    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest(
            "Merci de fournir une URL à analyser.".to_string(),
        ));
    }

    let metrics = analyzer::analyze_url(&state, url).await?;
    let verdict = score::score(&metrics);

    Ok(Json(AnalyzeResponse {
        niveau: verdict.grade,
        message: verdict.message.to_string(),
        conseils: verdict.advice,
        diagnostic: metrics,
    }))
}
