// state.rs — application state: HTTP client, metrics cache, log buffer

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::analyzer::fetcher::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::models::PageMetrics;

/// How long a cached analysis stays valid.
const METRICS_TTL_SECS: u64 = 300;

/// Capacity of the in-memory log ring buffer.
pub const LOG_BUFFER_CAPACITY: usize = 1000;

// ── Log Ring Buffer ─────────────────────────────────────────────────────────
/// In-memory ring buffer for backend log entries (last N events).
/// Uses `std::sync::Mutex` because writes happen in the tracing Layer
/// (sync context — not inside a tokio runtime poll).

#[derive(Clone, serde::Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

pub struct LogRingBuffer {
    entries: std::sync::Mutex<VecDeque<LogEntry>>,
    capacity: usize,
}

impl LogRingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: std::sync::Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut buf = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        if buf.len() >= self.capacity {
            buf.pop_front();
        }
        buf.push_back(entry);
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }

    /// Newest-first slice of the buffer, optionally filtered by minimum
    /// level and a case-insensitive substring search.
    pub fn recent(
        &self,
        limit: usize,
        min_level: Option<&str>,
        search: Option<&str>,
    ) -> Vec<LogEntry> {
        let buf = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        buf.iter()
            .rev()
            .filter(|e| min_level.is_none_or(|lvl| level_ord(&e.level) >= level_ord(lvl)))
            .filter(|e| {
                search.is_none_or(|s| {
                    let s_lower = s.to_lowercase();
                    e.message.to_lowercase().contains(&s_lower)
                        || e.target.to_lowercase().contains(&s_lower)
                })
            })
            .take(limit)
            .cloned()
            .collect()
    }
}

fn level_ord(level: &str) -> u8 {
    match level.to_uppercase().as_str() {
        "ERROR" => 5,
        "WARN" => 4,
        "INFO" => 3,
        "DEBUG" => 2,
        "TRACE" => 1,
        _ => 0,
    }
}

// ── Metrics Cache ───────────────────────────────────────────────────────────

struct CacheEntry {
    metrics: PageMetrics,
    created_at: Instant,
}

/// TTL map of analysis results keyed by normalized URL.
///
/// Eviction is lazy: an expired entry is dropped the next time its URL is
/// looked up. No background sweeper, no capacity bound. Concurrent misses
/// for the same URL may each fetch; the last store wins.
pub struct MetricsCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(METRICS_TTL_SECS))
    }

    /// Cache with a custom TTL. Tests use this to compress time.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Fresh metrics for the URL, or None. Expired entries are removed here.
    pub async fn get(&self, url: &str) -> Option<PageMetrics> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(url) {
            if entry.created_at.elapsed() <= self.ttl {
                return Some(entry.metrics.clone());
            }
            entries.remove(url);
        }
        None
    }

    /// Store metrics for the URL, replacing any previous entry.
    pub async fn put(&self, url: &str, metrics: PageMetrics) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            url.to_string(),
            CacheEntry {
                metrics,
                created_at: Instant::now(),
            },
        );
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}

// ── Application State ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    /// Shared HTTP client for page fetches. Fixed user agent, 10 s total
    /// budget, redirects followed per reqwest's default policy.
    pub client: Client,
    /// Analysis results keyed by normalized URL.
    pub cache: Arc<MetricsCache>,
    pub start_time: Instant,
    /// In-memory ring buffer for backend log entries (last 1000).
    pub log_buffer: Arc<LogRingBuffer>,
}

impl AppState {
    pub fn new(log_buffer: Arc<LogRingBuffer>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            cache: Arc::new(MetricsCache::new()),
            start_time: Instant::now(),
            log_buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> PageMetrics {
        PageMetrics {
            page_weight_kb: 12.5,
            request_count: 3,
            image_count: 1,
            large_image_count: 0,
            third_party_requests: 1,
            inline_script_kb: 0.4,
        }
    }

    #[tokio::test]
    async fn cache_returns_stored_metrics_within_ttl() {
        let cache = MetricsCache::with_ttl(Duration::from_secs(60));
        cache.put("https://example.com/", sample_metrics()).await;

        let hit = cache.get("https://example.com/").await;
        assert_eq!(hit.map(|m| m.request_count), Some(3));
    }

    #[tokio::test]
    async fn cache_misses_unknown_urls() {
        let cache = MetricsCache::with_ttl(Duration::from_secs(60));
        assert!(cache.get("https://example.org/").await.is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_evicted_on_lookup() {
        let cache = MetricsCache::with_ttl(Duration::from_millis(10));
        cache.put("https://example.com/", sample_metrics()).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(cache.get("https://example.com/").await.is_none());
        // a second lookup still misses; the entry is gone, not revived
        assert!(cache.get("https://example.com/").await.is_none());
    }

    #[tokio::test]
    async fn put_replaces_previous_entry() {
        let cache = MetricsCache::with_ttl(Duration::from_secs(60));
        cache.put("https://example.com/", sample_metrics()).await;

        let mut updated = sample_metrics();
        updated.request_count = 9;
        cache.put("https://example.com/", updated).await;

        let hit = cache.get("https://example.com/").await;
        assert_eq!(hit.map(|m| m.request_count), Some(9));
    }

    fn entry(level: &str, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            level: level.to_string(),
            target: "greencheck_backend::analyzer".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn ring_buffer_drops_oldest_beyond_capacity() {
        let buffer = LogRingBuffer::new(2);
        buffer.push(entry("INFO", "one"));
        buffer.push(entry("INFO", "two"));
        buffer.push(entry("INFO", "three"));

        let recent = buffer.recent(10, None, None);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "three");
        assert_eq!(recent[1].message, "two");
    }

    #[test]
    fn ring_buffer_filters_by_level_and_search() {
        let buffer = LogRingBuffer::new(10);
        buffer.push(entry("DEBUG", "cache hit for https://example.com/"));
        buffer.push(entry("INFO", "fetched https://example.com/"));
        buffer.push(entry("ERROR", "analyze rejected: URL fournie invalide."));

        let errors = buffer.recent(10, Some("error"), None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].level, "ERROR");

        let hits = buffer.recent(10, None, Some("CACHE"));
        assert_eq!(hits.len(), 1);
        assert!(hits[0].message.contains("cache hit"));
    }

    #[test]
    fn ring_buffer_clear_empties_it() {
        let buffer = LogRingBuffer::new(10);
        buffer.push(entry("INFO", "one"));
        buffer.push(entry("INFO", "two"));
        buffer.clear();

        assert!(buffer.recent(10, None, None).is_empty());
    }
}
