// telemetry.rs — tracing subscriber setup and the log capture layer

use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::state::{LogEntry, LogRingBuffer};

/// Mirrors every event into the in-memory ring buffer so GET /logs can
/// serve recent entries without touching disk.
pub struct CaptureLayer {
    buffer: Arc<LogRingBuffer>,
}

impl CaptureLayer {
    pub fn new(buffer: Arc<LogRingBuffer>) -> Self {
        Self { buffer }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let message = if visitor.fields.is_empty() {
            visitor.message
        } else {
            format!("{}{}", visitor.message, visitor.fields)
        };

        self.buffer.push(LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: event.metadata().level().to_string(),
            target: event.metadata().target().to_string(),
            message,
        });
    }
}

/// Collects the `message` field; other fields are appended as `key=value`
/// so structured context is not lost.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        use std::fmt::Write;
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        use std::fmt::Write;
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

/// Install the global subscriber: env-filtered fmt output (JSON when
/// `RUST_LOG_FORMAT=json`) plus the ring buffer capture layer.
pub fn init(buffer: Arc<LogRingBuffer>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let capture = CaptureLayer::new(buffer);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .with(capture)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(capture)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_land_in_the_buffer_with_level_and_target() {
        let buffer = Arc::new(LogRingBuffer::new(10));
        let subscriber =
            tracing_subscriber::registry().with(CaptureLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("analyze: accepted https://example.com/");
            tracing::warn!(status = 404, "fetch failed");
        });

        let entries = buffer.recent(10, None, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "WARN");
        assert!(entries[0].message.contains("fetch failed"));
        assert!(entries[0].message.contains("status=404"));
        assert_eq!(entries[1].level, "INFO");
        assert!(entries[1].target.starts_with("greencheck_backend"));
    }
}
