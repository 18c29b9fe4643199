//! Browser console log sink.

use turbo_observability::{LogEntry, LogLevel, LogSink};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Routes each entry to the console method matching its level, so browser
/// devtools can filter them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, line: &str) {
        let line = JsValue::from_str(line);
        match entry.level {
            LogLevel::Error => console::error_1(&line),
            LogLevel::Warn => console::warn_1(&line),
            LogLevel::Info => console::info_1(&line),
            LogLevel::Debug | LogLevel::Trace => console::debug_1(&line),
        }
    }
}
