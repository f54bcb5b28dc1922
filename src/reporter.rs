//! Structured diagnostics for a stamping run
//!
//! The orchestrator reports through the [`Reporter`] trait so callers pick
//! the sink. [`LogReporter`] forwards to the `log` facade; [`MemoryReporter`]
//! keeps records in memory.

use serde_json::{json, Value};
use std::cell::RefCell;

/// Severity of a reported event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Error,
    Info,
    Debug,
}

impl From<ReportLevel> for log::Level {
    fn from(level: ReportLevel) -> Self {
        match level {
            ReportLevel::Error => log::Level::Error,
            ReportLevel::Info => log::Level::Info,
            ReportLevel::Debug => log::Level::Debug,
        }
    }
}

/// Sink for diagnostics emitted while stamping
pub trait Reporter {
    /// Report an event with a human message and structured fields
    fn report(&self, level: ReportLevel, event: &str, message: &str, data: Value);

    fn info(&self, event: &str, message: &str) {
        self.report(ReportLevel::Info, event, message, Value::Null);
    }
}

/// Reporter writing `message | {json}` lines through the `log` crate
#[derive(Debug, Clone, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for LogReporter {
    fn report(&self, level: ReportLevel, event: &str, message: &str, data: Value) {
        let level: log::Level = level.into();
        if !log::log_enabled!(level) {
            return;
        }

        let payload = structured_payload(event, data);
        log::log!(level, "{} | {}", message, payload);
    }
}

/// Merge the event name and a timestamp into the caller's fields
fn structured_payload(event: &str, data: Value) -> Value {
    let mut payload = json!({
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    match data {
        Value::Object(fields) => {
            if let Value::Object(ref mut map) = payload {
                map.extend(fields);
            }
        }
        Value::Null => {}
        other => payload["data"] = other,
    }
    payload
}

/// One captured report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub level: ReportLevel,
    pub event: String,
    pub message: String,
    pub data: Value,
}

/// Reporter that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: RefCell<Vec<ReportRecord>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ReportRecord> {
        self.records.borrow().clone()
    }

    pub fn has_event(&self, event: &str) -> bool {
        self.records.borrow().iter().any(|r| r.event == event)
    }

    pub fn errors(&self) -> Vec<ReportRecord> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level == ReportLevel::Error)
            .cloned()
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: ReportLevel, event: &str, message: &str, data: Value) {
        self.records.borrow_mut().push(ReportRecord {
            level,
            event: event.to_string(),
            message: message.to_string(),
            data,
        });
    }
}
