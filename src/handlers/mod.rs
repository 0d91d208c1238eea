// ---------------------------------------------------------------------------
// handlers/ — HTTP surface
// Sub-modules per concern; mod.rs holds the shared error type and
// re-exports so lib.rs routes read as `handlers::analyze_site` etc.
// ---------------------------------------------------------------------------

// Sub-modules are pub(crate) so utoipa __path_* types are accessible from lib.rs OpenApi derive.
pub(crate) mod analyze;
pub(crate) mod system;

pub use analyze::analyze_site;
pub use system::{backend_logs, clear_backend_logs, health, readiness};

// ── utoipa __path_* re-exports ───────────────────────────────────────────────
// The #[utoipa::path] attribute macro generates private structs like
// __path_health. The OpenApi derive in lib.rs expects them at
// `handlers::__path_health`, so we re-export them here.
pub use analyze::__path_analyze_site;
pub use system::{__path_backend_logs, __path_clear_backend_logs, __path_health, __path_readiness};

use axum::Json;
use axum::http::StatusCode;
use serde_json::json;

use crate::analyzer::AnalysisError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Centralized API error type for all handlers.
///
/// The wire format is flat — `{"error": "<message>"}` — and the message is
/// the complete user-facing text; the frontend renders it as-is. Anything
/// beyond it stays in the server logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every pipeline failure is a request-level outcome, never a server
/// fault: the classified message travels out as a 400.
impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("handlers: API error ({}): {}", status.as_u16(), self);
        } else {
            tracing::warn!("handlers: API error ({}): {}", status.as_u16(), self);
        }
        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
