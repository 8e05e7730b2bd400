//! Protocol event log.
//!
//! Sessions record what they did with each message (accepted, rejected,
//! dropped as malformed) here. Entries can be echoed to stderr, captured in
//! memory for inspection, or both. Captured entries are capped; the oldest
//! are dropped first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Severity, most severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        })
    }
}

/// Where entries go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    #[default]
    Stderr,
    Memory,
    Both,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Subsystem, e.g. `"codec"` or `"submission"`.
    pub category: &'static str,
    pub message: String,
}

/// Default cap on captured entries.
pub const DEFAULT_LOG_CAPACITY: usize = 1024;

/// Leveled, categorized event log.
#[derive(Clone, Debug)]
pub struct ProtocolLog {
    verbosity: LogLevel,
    output: LogOutput,
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

/// Sessions default to warnings and errors on stderr, so routine accepts
/// and rejects stay quiet unless a caller raises the verbosity.
impl Default for ProtocolLog {
    fn default() -> Self {
        Self::new(LogLevel::Warn)
    }
}

impl ProtocolLog {
    /// Log to stderr at `verbosity` and above.
    #[must_use]
    pub fn new(verbosity: LogLevel) -> Self {
        Self {
            verbosity,
            output: LogOutput::default(),
            capacity: DEFAULT_LOG_CAPACITY,
            entries: VecDeque::new(),
        }
    }

    /// Capture everything in memory without printing.
    #[must_use]
    pub fn capturing() -> Self {
        Self {
            verbosity: LogLevel::Debug,
            output: LogOutput::Memory,
            capacity: DEFAULT_LOG_CAPACITY,
            entries: VecDeque::new(),
        }
    }

    /// Keep at most `capacity` captured entries.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self.trim();
        self
    }

    pub fn set_output(&mut self, output: LogOutput) {
        self.output = output;
    }

    pub fn set_verbosity(&mut self, verbosity: LogLevel) {
        self.verbosity = verbosity;
    }

    pub fn log(&mut self, level: LogLevel, category: &'static str, message: impl Into<String>) {
        if level > self.verbosity {
            return;
        }
        let entry = LogEntry {
            level,
            category,
            message: message.into(),
        };
        if matches!(self.output, LogOutput::Stderr | LogOutput::Both) {
            eprintln!("[{}] {}: {}", entry.level, entry.category, entry.message);
        }
        if matches!(self.output, LogOutput::Memory | LogOutput::Both) {
            self.entries.push_back(entry);
            self.trim();
        }
    }

    fn trim(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn error(&mut self, category: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Error, category, message);
    }

    pub fn warn(&mut self, category: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Warn, category, message);
    }

    pub fn info(&mut self, category: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Info, category, message);
    }

    pub fn debug(&mut self, category: &'static str, message: impl Into<String>) {
        self.log(LogLevel::Debug, category, message);
    }

    /// Captured entries, oldest first (empty unless capturing).
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of captured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captured entries in one category.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a LogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_respects_verbosity() {
        let mut log = ProtocolLog::capturing();
        log.set_verbosity(LogLevel::Info);

        log.debug("codec", "noise");
        log.info("submission", "accepted");
        log.warn("codec", "dropped");

        assert_eq!(log.len(), 2);
        assert_eq!(log.in_category("codec").count(), 1);
        assert_eq!(log.entries().nth(1).map(|e| e.level), Some(LogLevel::Warn));
    }

    #[test]
    fn test_stderr_only_keeps_nothing() {
        let mut log = ProtocolLog::new(LogLevel::Debug);
        log.error("codec", "bad payload");
        assert!(log.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut log = ProtocolLog::capturing();
        log.info("sync", "phase changed");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_capture_is_capped() {
        let mut log = ProtocolLog::capturing().with_capacity(3);
        for round in 0..10 {
            log.info("sync", format!("tick {round}"));
        }

        assert_eq!(log.len(), 3);
        let kept: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(kept, vec!["tick 7", "tick 8", "tick 9"]);
    }

    #[test]
    fn test_default_is_quiet_for_routine_events() {
        let mut log = ProtocolLog::default();
        log.set_output(LogOutput::Memory);

        log.info("submission", "accepted");
        log.warn("codec", "dropped");

        assert_eq!(log.len(), 1);
    }
}
