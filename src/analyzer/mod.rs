// ---------------------------------------------------------------------------
// analyzer/ — the analysis pipeline
// normalize → cache lookup → fetch + extract on miss → cache store.
// Scoring is pure and lives in score.rs; handlers call it on the result.
// ---------------------------------------------------------------------------

pub mod extract;
pub mod fetcher;
pub mod normalize;
pub mod score;

use crate::models::PageMetrics;
use crate::state::AppState;

pub use fetcher::FetchError;

/// Why a URL could not be analyzed. Display is the user-facing French
/// message returned verbatim in the error body.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("URL fournie invalide.")]
    InvalidUrl,

    #[error("Seuls les protocoles HTTP/HTTPS sont acceptés.")]
    UnsupportedScheme,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Run the full pipeline for one raw URL and return its metrics, served
/// from the cache when a fresh entry exists.
///
/// Concurrent misses for the same URL are not deduplicated: each fetches,
/// and the last result wins in the cache.
pub async fn analyze_url(state: &AppState, raw_url: &str) -> Result<PageMetrics, AnalysisError> {
    let normalized = normalize::normalize_url(raw_url)?;

    if let Some(metrics) = state.cache.get(&normalized).await {
        tracing::debug!("analyzer: cache hit for {}", normalized);
        return Ok(metrics);
    }

    let page = fetcher::fetch_page(&state.client, &normalized).await?;
    let metrics = extract::extract_metrics(&normalized, &page);
    state.cache.put(&normalized, metrics.clone()).await;
    tracing::info!(
        "analyzer: {} fetched ({} KB, {} requests)",
        normalized,
        metrics.page_weight_kb,
        metrics.request_count
    );

    Ok(metrics)
}
