// ---------------------------------------------------------------------------
// handlers/system.rs — health, readiness, backend logs
// ---------------------------------------------------------------------------

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::HealthResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Health Endpoints
// ---------------------------------------------------------------------------

/// GET /health — liveness check. Touches nothing, always succeeds.
#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Backend Green Check is running".to_string(),
    })
}

/// GET /health/ready — readiness probe with uptime. There are no backing
/// services to warm up, so readiness mirrors liveness.
#[utoipa::path(get, path = "/health/ready", tag = "health",
    responses((status = 200, description = "Service ready", body = Value))
)]
pub async fn readiness(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ready": true,
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

// ---------------------------------------------------------------------------
// Backend Logs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct BackendLogsQuery {
    pub limit: Option<usize>,
    pub level: Option<String>,
    pub search: Option<String>,
}

/// GET /logs — recent in-memory log entries, newest first.
#[utoipa::path(get, path = "/logs", tag = "system",
    params(
        ("limit" = Option<usize>, Query, description = "Max entries to return (default 200, cap 500)"),
        ("level" = Option<String>, Query, description = "Minimum level, trace through error"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter")
    ),
    responses((status = 200, description = "Recent backend log entries", body = Value))
)]
pub async fn backend_logs(
    State(state): State<AppState>,
    Query(q): Query<BackendLogsQuery>,
) -> Json<Value> {
    let limit = q.limit.unwrap_or(200).min(500);
    let entries = state
        .log_buffer
        .recent(limit, q.level.as_deref(), q.search.as_deref());
    Json(json!({ "logs": entries, "total": entries.len() }))
}

/// DELETE /logs — empty the ring buffer.
#[utoipa::path(delete, path = "/logs", tag = "system",
    responses((status = 200, description = "Log buffer cleared", body = Value))
)]
pub async fn clear_backend_logs(State(state): State<AppState>) -> Json<Value> {
    state.log_buffer.clear();
    Json(json!({ "cleared": true }))
}
