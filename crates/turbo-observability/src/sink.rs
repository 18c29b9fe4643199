//! Destinations for formatted log entries.

use std::cell::RefCell;

use crate::logging::LogEntry;

/// Receives every emitted entry along with its formatted line.
pub trait LogSink {
    fn write(&self, entry: &LogEntry, line: &str);
}

/// Writes lines to stderr (native hosts and wasmtime capture this).
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, _entry: &LogEntry, line: &str) {
        eprintln!("{}", line);
    }
}

/// Keeps entries in memory, for tests and replay.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<(LogEntry, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.records.borrow().iter().map(|(e, _)| e.clone()).collect()
    }

    /// Captured formatted lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.records.borrow().iter().map(|(_, l)| l.clone()).collect()
    }

    /// Captured messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|(e, _)| e.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, line: &str) {
        self.records
            .borrow_mut()
            .push((entry.clone(), line.to_string()));
    }
}
