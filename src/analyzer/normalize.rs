// ---------------------------------------------------------------------------
// analyzer/normalize.rs — URL normalization and validation
// ---------------------------------------------------------------------------

use url::Url;

use super::AnalysisError;

/// Normalize user input into an absolute http(s) URL string.
///
/// Bare domains get an `https://` prefix before parsing; input that already
/// carries a scheme is parsed as-is so non-http schemes are rejected rather
/// than silently rewrapped. The output is the parser's canonical form
/// (hosts lowercased, root path made explicit).
pub fn normalize_url(raw: &str) -> Result<String, AnalysisError> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let parsed = Url::parse(&candidate).map_err(|_| AnalysisError::InvalidUrl)?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AnalysisError::InvalidUrl);
    }
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AnalysisError::UnsupportedScheme);
    }

    Ok(parsed.to_string())
}
