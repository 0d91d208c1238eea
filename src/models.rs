use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Analysis request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Address to analyze. The scheme may be omitted; https is assumed.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Ecological impact grade, A (best) to E (worst).
    pub niveau: Grade,
    /// One-line verdict matching the grade.
    pub message: String,
    /// Improvement tips for the grade, joined with "; ".
    pub conseils: String,
    /// Raw extracted metrics behind the grade.
    pub diagnostic: PageMetrics,
}

/// Flat error body returned for every rejected analysis: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Page metrics
// ---------------------------------------------------------------------------

/// Structural signals extracted from a fetched page. Counters come from a
/// regex scan of the raw markup, not a DOM — they are heuristics, not exact
/// resource accounting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageMetrics {
    /// Decompressed document size in KB, rounded to 2 decimals.
    pub page_weight_kb: f64,
    /// Estimated request count: absolute src/href references + 1 for the
    /// document itself, never below 1.
    pub request_count: u32,
    /// Number of `<img>` tags.
    pub image_count: u32,
    /// `<img>` tags matching the large-image heuristic.
    pub large_image_count: u32,
    /// Referenced resources whose host differs from the page host.
    pub third_party_requests: u32,
    /// Total trimmed inline `<script>` body size in KB, rounded to 2 decimals.
    pub inline_script_kb: f64,
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

/// Ecological impact grade, ordered best (A) to worst (E).
/// Serializes as the bare letter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
