pub mod advice;
pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod state;
pub mod telemetry;

use axum::Router;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GreenCheck Backend",
        version = "1.0.0",
        description = "Ecological impact scoring for web pages"
    ),
    paths(
        handlers::analyze_site,
        handlers::health,
        handlers::readiness,
        handlers::backend_logs,
        handlers::clear_backend_logs,
    ),
    components(schemas(
        models::AnalyzeRequest,
        models::AnalyzeResponse,
        models::ErrorResponse,
        models::PageMetrics,
        models::Grade,
        models::HealthResponse,
    )),
    tags(
        (name = "analysis", description = "URL impact analysis"),
        (name = "health", description = "Liveness and readiness"),
        (name = "system", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router with the given state.
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a network port.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Analysis
        .route("/analyze/", post(handlers::analyze_site))
        // Health
        .route("/health", get(handlers::health))
        .route("/health/ready", get(handlers::readiness))
        // Logs
        .route(
            "/logs",
            get(handlers::backend_logs).delete(handlers::clear_backend_logs),
        )
        // API docs
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Shared state
        .with_state(state)
}
