use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};

use log::Log as _;
use parking_lot::Mutex;

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    fn render(&self) -> String {
        format!("[{:<5} {}] {}", self.level, self.target, self.message)
    }
}

/// Ring buffer of captured log entries.
#[derive(Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    max_capacity: usize,
}

impl LogBuffer {
    fn new(max_capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_capacity.min(1024)),
            max_capacity,
        }
    }

    fn push(&mut self, entry: LogEntry) {
        if self.entries.len() >= self.max_capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The newest `count` entries, oldest first.
    fn tail(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(count))
    }
}

static LOG_BUFFER: OnceLock<Arc<Mutex<LogBuffer>>> = OnceLock::new();

/// Logger that forwards to `env_logger` and keeps recent entries for the
/// session's `log` command.
struct LogCapture {
    inner: env_logger::Logger,
    buffer: Arc<Mutex<LogBuffer>>,
}

impl log::Log for LogCapture {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
            self.buffer.lock().push(LogEntry {
                level: record.level(),
                target: record.target().to_owned(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the capturing logger.
///
/// `default_level` is an `env_logger` filter used when `RUST_LOG` is unset.
pub fn install(default_level: &str) -> Result<(), log::SetLoggerError> {
    let buffer = Arc::new(Mutex::new(LogBuffer::new(1_000)));
    let inner =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp(None)
            .build();
    let max_level = inner.filter();

    log::set_boxed_logger(Box::new(LogCapture {
        inner,
        buffer: buffer.clone(),
    }))?;
    log::set_max_level(max_level);
    let _ = LOG_BUFFER.set(buffer);
    Ok(())
}

/// The last `count` captured messages, oldest first.
///
/// Empty when the capturing logger is not installed.
pub fn recent(count: usize) -> Vec<String> {
    LOG_BUFFER
        .get()
        .map(|buffer| buffer.lock().tail(count).map(LogEntry::render).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            level: log::Level::Info,
            target: "larder".into(),
            message: message.into(),
        }
    }

    #[test]
    fn ring_buffer_drops_oldest() {
        let mut buffer = LogBuffer::new(2);
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        buffer.push(entry("c"));
        let messages: Vec<_> = buffer.tail(10).map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["b", "c"]);
    }

    #[test]
    fn tail_returns_newest_oldest_first() {
        let mut buffer = LogBuffer::new(10);
        for message in ["a", "b", "c"] {
            buffer.push(entry(message));
        }
        let rendered: Vec<_> = buffer.tail(2).map(LogEntry::render).collect();
        assert_eq!(rendered, ["[INFO  larder] b", "[INFO  larder] c"]);
        assert_eq!(buffer.tail(0).count(), 0);
    }
}
