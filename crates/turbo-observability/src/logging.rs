//! Structured logging with page context.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::sink::{LogSink, StderrSink};

/// Severity, ordered from noisiest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One emitted record, as handed to a [`LogSink`].
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Path of the page the entry was produced on.
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    /// Component within the workload (e.g. a single page behavior).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Typed fields, flattened into the JSON object.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Milliseconds since page start, when a clock is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
}

impl LogEntry {
    /// One-line JSON object; falls back to the bare message.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] component: message (12.5ms) | key=value ...`
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}]", self.level);
        if let Some(component) = &self.component {
            s.push_str(&format!(" {}:", component));
        }
        s.push(' ');
        s.push_str(&self.message);

        if let Some(elapsed) = self.elapsed_ms {
            s.push_str(&format!(" ({:.1}ms)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Line format handed to the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    /// Readable in a browser console.
    Human,
}

/// Source of elapsed time in milliseconds.
pub type Clock = Rc<dyn Fn() -> f64>;

type Fields = BTreeMap<String, serde_json::Value>;

/// Structured logger with page context.
///
/// Cheap to clone; clones share the sink and clock. Component loggers are
/// derived with [`StructuredLogger::for_component`].
#[derive(Clone)]
pub struct StructuredLogger {
    page: String,
    workload: Option<String>,
    component: Option<String>,
    min_level: LogLevel,
    format: LogFormat,
    sink: Rc<dyn LogSink>,
    clock: Option<Clock>,
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("page", &self.page)
            .field("workload", &self.workload)
            .field("component", &self.component)
            .field("min_level", &self.min_level)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl StructuredLogger {
    /// Logger for `page` at info level, JSON lines to stderr.
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            workload: None,
            component: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Rc::new(StderrSink),
            clock: None,
        }
    }

    pub fn with_workload(mut self, workload: impl Into<String>) -> Self {
        self.workload = Some(workload.into());
        self
    }

    /// Drop entries below `level`.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Send formatted entries to `sink`.
    pub fn with_sink(mut self, sink: Rc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Stamp entries with the time reported by `clock`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Derive a logger tagged with a component name.
    pub fn for_component(&self, component: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.component = Some(component.into());
        child
    }

    /// Check whether entries at `level` would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, Fields::new());
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, Fields::new());
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, Fields::new());
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, Fields::new());
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, Fields::new());
    }

    /// Page path every entry is tagged with.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Entry at `level` carrying extra fields; nothing is written until
    /// [`LogBuilder::emit`].
    pub fn builder(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: Fields::new(),
        }
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Warn, message)
    }

    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Error, message)
    }

    fn log(&self, level: LogLevel, message: &str, fields: Fields) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            page: self.page.clone(),
            workload: self.workload.clone(),
            component: self.component.clone(),
            fields,
            elapsed_ms: self.clock.as_ref().map(|clock| clock()),
        };
        let line = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        self.sink.write(&entry, &line);
    }
}

/// An entry under construction. Fields keep their JSON types.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: Fields,
}

impl LogBuilder<'_> {
    fn with(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn field(self, key: &str, value: impl Into<String>) -> Self {
        self.with(key, serde_json::Value::String(value.into()))
    }

    pub fn field_i64(self, key: &str, value: i64) -> Self {
        self.with(key, value.into())
    }

    /// Non-finite values are recorded as `null`.
    pub fn field_f64(self, key: &str, value: f64) -> Self {
        self.with(key, value.into())
    }

    pub fn field_bool(self, key: &str, value: bool) -> Self {
        self.with(key, value.into())
    }

    /// Any serializable value, nested as JSON. Unserializable values become
    /// `null`.
    pub fn field_json(self, key: &str, value: &impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        self.with(key, value)
    }

    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn capture(level: LogLevel) -> (StructuredLogger, Rc<MemorySink>) {
        let sink = Rc::new(MemorySink::new());
        let logger = StructuredLogger::new("/products/1")
            .with_workload("storefront")
            .with_min_level(level)
            .with_sink(sink.clone());
        (logger, sink)
    }

    #[test]
    fn test_min_level_filters_entries() {
        let (logger, sink) = capture(LogLevel::Info);
        logger.debug("hidden");
        logger.info("shown");
        logger.error("also shown");
        assert_eq!(sink.messages(), vec!["shown", "also shown"]);
    }

    #[test]
    fn test_component_logger_tags_entries() {
        let (logger, sink) = capture(LogLevel::Debug);
        logger.for_component("rating").debug("star clicked");
        let entries = sink.entries();
        assert_eq!(entries[0].component.as_deref(), Some("rating"));
        assert_eq!(entries[0].page, "/products/1");
    }

    #[test]
    fn test_builder_fields_in_json() {
        let (logger, sink) = capture(LogLevel::Debug);
        logger
            .info_builder("installed")
            .field("behavior", "alerts")
            .field_i64("bound", 3)
            .field_bool("observer", true)
            .emit();

        let json: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["behavior"], "alerts");
        assert_eq!(json["bound"], 3);
        assert_eq!(json["observer"], true);
        assert_eq!(json["workload"], "storefront");
    }

    #[test]
    fn test_human_format_with_clock() {
        let sink = Rc::new(MemorySink::new());
        let logger = StructuredLogger::new("/")
            .with_format(LogFormat::Human)
            .with_sink(sink.clone())
            .with_clock(Rc::new(|| 12.5));
        logger.for_component("alerts").warn_builder("fading").field_i64("count", 2).emit();
        assert_eq!(sink.lines()[0], "[WARN] alerts: fading (12.5ms) | count=2");
    }
}
