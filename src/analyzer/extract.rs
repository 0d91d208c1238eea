// ---------------------------------------------------------------------------
// analyzer/extract.rs — regex metric extraction over raw markup
// ---------------------------------------------------------------------------
// No DOM: tags and references are counted with pattern matches on the raw
// text, so malformed markup degrades to fewer matches rather than a parse
// failure. Tags inside comments or strings count like real markup.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::fetcher::FetchedPage;
use crate::models::PageMetrics;

/// Size hints at or above this many pixels flag an image as large.
const LARGE_DIMENSION_PX: u64 = 1400;

static IMG_RE: OnceLock<Regex> = OnceLock::new();
static SIZE_HINT_RE: OnceLock<Regex> = OnceLock::new();
static RESOURCE_RE: OnceLock<Regex> = OnceLock::new();
static SCRIPT_RE: OnceLock<Regex> = OnceLock::new();

fn img_re() -> &'static Regex {
    IMG_RE.get_or_init(|| Regex::new(r"(?i)<img[^>]*>").expect("img regex is valid"))
}

fn size_hint_re() -> &'static Regex {
    SIZE_HINT_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:width|height|data-[wh])\s*=\s*["']?(\d+)"#)
            .expect("size hint regex is valid")
    })
}

fn resource_re() -> &'static Regex {
    RESOURCE_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:src|href)\s*=\s*["'](https?://[^"']+)["']"#)
            .expect("resource regex is valid")
    })
}

fn script_re() -> &'static Regex {
    SCRIPT_RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("script regex is valid")
    })
}

/// Round to 2 decimals, the precision the frontend displays.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scan a fetched page and derive all metrics.
pub fn extract_metrics(page_url: &str, page: &FetchedPage) -> PageMetrics {
    let html = &page.text;

    let img_tags: Vec<&str> = img_re().find_iter(html).map(|m| m.as_str()).collect();
    let large_images = img_tags
        .iter()
        .filter(|tag| is_likely_large_image(tag))
        .count();

    let resources: Vec<&str> = resource_re()
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    // +1 for the document itself
    let request_count = (resources.len() as u32 + 1).max(1);

    let page_host = Url::parse(page_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned));
    let third_party = resources
        .iter()
        .filter(|r| is_third_party(r, page_host.as_deref()))
        .count();

    PageMetrics {
        page_weight_kb: round2(page.body.len() as f64 / 1024.0),
        request_count,
        image_count: img_tags.len() as u32,
        large_image_count: large_images as u32,
        third_party_requests: third_party as u32,
        inline_script_kb: inline_script_weight(html),
    }
}

/// A reference is third-party when its host differs from the page host.
/// References that do not parse count as third-party.
fn is_third_party(resource: &str, page_host: Option<&str>) -> bool {
    let Some(page_host) = page_host else {
        return true;
    };
    match Url::parse(resource) {
        Ok(u) => u.host_str() != Some(page_host),
        Err(_) => true,
    }
}

/// Heuristic for "this image is probably big": naming, retina marker with a
/// raster extension, or an explicit size hint >= 1400 px. First rule wins.
fn is_likely_large_image(tag: &str) -> bool {
    let lower = tag.to_lowercase();
    if lower.contains("hero") || lower.contains("banner") {
        return true;
    }
    if [".png", ".webp", ".jpg", ".jpeg"]
        .iter()
        .any(|ext| lower.contains(ext))
        && lower.contains("2x")
    {
        return true;
    }
    // Digit runs that overflow u64 saturate rather than drop: a 20-digit
    // width is still a large image.
    size_hint_re()
        .captures_iter(tag)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .any(|px| px >= LARGE_DIMENSION_PX)
}

/// Total byte weight of non-empty inline script bodies, in KB.
fn inline_script_weight(html: &str) -> f64 {
    let total: usize = script_re()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::len)
        .sum();
    round2(total as f64 / 1024.0)
}
