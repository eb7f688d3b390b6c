// Logging module - In-memory log capture for TUI display
//
// A tracing layer that keeps recent events in a bounded buffer, message plus
// structured fields, so the TUI can show them in its logs panel instead of
// letting them write through the alternate screen.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Maximum number of log entries to keep in memory
pub const MAX_LOG_ENTRIES: usize = 1000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    /// Structured fields other than the message, in recording order
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Message followed by `key=value` pairs
    pub fn display_line(&self) -> String {
        let mut line = self.message.clone();
        for (key, value) in &self.fields {
            let _ = write!(line, " {key}={value}");
        }
        line
    }
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a log entry, dropping the oldest when full
    pub fn add(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from(metadata.level()),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Splits an event into its message and the remaining fields
#[derive(Default)]
struct EntryVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(buffer: &LogBuffer, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_captures_message_and_fields() {
        let buffer = LogBuffer::new();
        capture(&buffer, || {
            tracing::warn!(employee_id = 3, source = "fixture", "Fetch failed");
        });

        let entries = buffer.recent(10);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.message, "Fetch failed");
        assert_eq!(
            entry.fields,
            vec![
                ("employee_id".to_string(), "3".to_string()),
                ("source".to_string(), "fixture".to_string()),
            ]
        );
        assert_eq!(entry.display_line(), "Fetch failed employee_id=3 source=fixture");
    }

    #[test]
    fn test_formatted_message_has_no_quotes() {
        let buffer = LogBuffer::new();
        capture(&buffer, || {
            tracing::info!("Loaded {} employees", 10);
        });
        assert_eq!(buffer.recent(1)[0].message, "Loaded 10 employees");
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = LogBuffer::with_capacity(3);
        capture(&buffer, || {
            for i in 0..5 {
                tracing::info!(i, "tick");
            }
        });

        assert_eq!(buffer.len(), 3);
        let kept: Vec<String> = buffer
            .recent(10)
            .into_iter()
            .map(|e| e.fields[0].1.clone())
            .collect();
        assert_eq!(kept, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_recent_returns_tail_in_order() {
        let buffer = LogBuffer::new();
        capture(&buffer, || {
            tracing::debug!("a");
            tracing::debug!("b");
            tracing::debug!("c");
        });
        let tail: Vec<String> = buffer.recent(2).into_iter().map(|e| e.message).collect();
        assert_eq!(tail, vec!["b", "c"]);
    }
}
