//! Structured logging for TurboCommerce page workloads.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with page context
//! - `LogBuilder` - Fluent construction of log entries with typed fields
//! - `LogSink` - Where formatted entries go (`StderrSink`, `MemorySink`,
//!   or a host-provided sink such as the browser console)

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;
