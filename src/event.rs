use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notice::BacktraceFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            Severity::Error
        } else if level == tracing::Level::WARN {
            Severity::Warn
        } else if level == tracing::Level::INFO {
            Severity::Info
        } else if level == tracing::Level::DEBUG {
            Severity::Debug
        } else {
            Severity::Trace
        }
    }
}

/// Error information carried by a log event.
///
/// `backtrace` holds whatever frames the host captured for the error;
/// producing them is the host's concern, not this crate's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub kind: String,
    pub message: String,
    pub backtrace: Vec<BacktraceFrame>,
    /// Messages of the source chain, outermost cause first.
    pub causes: Vec<String>,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            backtrace: Vec::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_backtrace(mut self, backtrace: Vec<BacktraceFrame>) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// Capture an error value, walking its `source` chain.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(current) = source {
            causes.push(current.to_string());
            source = current.source();
        }
        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            backtrace: Vec::new(),
            causes,
        }
    }
}

/// A single log event as handed over by the host logging pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
    pub severity: Severity,
    pub exception: Option<ExceptionInfo>,
    /// Call site of the log statement, when the host knows it.
    pub caller: Option<BacktraceFrame>,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            exception: None,
            caller: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn with_caller(mut self, caller: BacktraceFrame) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn has_exception(&self) -> bool {
        self.exception.is_some()
    }
}
