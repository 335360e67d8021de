// Log sinks

use crate::Level;
use std::sync::Mutex;

/// Destination for `(level, message)` pairs.
///
/// Components that report progress to their caller (the retry helper, for
/// instance) take a sink rather than writing to the global logger, so the
/// caller decides where the lines end up.
pub trait LogSink: Send + Sync {
    fn write_log(&self, level: Level, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(Level, &str) + Send + Sync,
{
    fn write_log(&self, level: Level, message: &str) {
        self(level, message)
    }
}

/// Forwards to the process-wide logger ([`crate::log`]).
#[derive(Debug, Clone)]
pub struct GlobalSink {
    target: &'static str,
}

impl GlobalSink {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for GlobalSink {
    fn default() -> Self {
        Self::new("tollgate")
    }
}

impl LogSink for GlobalSink {
    fn write_log(&self, level: Level, message: &str) {
        crate::log(level, self.target, message);
    }
}

/// A captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// Keeps every record at or above `min_level` in memory.
#[derive(Debug)]
pub struct MemorySink {
    min_level: Level,
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_min_level(Level::Trace)
    }

    pub fn with_min_level(min_level: Level) -> Self {
        Self {
            min_level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the records captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Messages captured at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    /// Remove and return everything captured.
    pub fn drain(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|mut records| std::mem::take(&mut *records))
            .unwrap_or_default()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn write_log(&self, level: Level, message: &str) {
        if level < self.min_level || level == Level::Off {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.write_log(Level::Info, "first");
        sink.write_log(Level::Warn, "second");

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].level, Level::Warn);
    }

    #[test]
    fn test_memory_sink_min_level() {
        let sink = MemorySink::with_min_level(Level::Warn);
        sink.write_log(Level::Info, "dropped");
        sink.write_log(Level::Error, "kept");
        sink.write_log(Level::Off, "never");

        assert_eq!(sink.messages_at(Level::Error), vec!["kept".to_string()]);
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_memory_sink_drain() {
        let sink = MemorySink::new();
        sink.write_log(Level::Debug, "one");
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink = move |level: Level, message: &str| {
            captured.lock().unwrap().push(format!("{level} {message}"));
        };

        sink.write_log(Level::Info, "hello");
        assert_eq!(seen.lock().unwrap().as_slice(), ["INFO hello".to_string()]);
    }

    #[test]
    fn test_sink_as_trait_object() {
        let sink: Box<dyn LogSink> = Box::new(MemorySink::new());
        sink.write_log(Level::Info, "boxed");
        GlobalSink::default().write_log(Level::Trace, "quiet by default");
    }
}
