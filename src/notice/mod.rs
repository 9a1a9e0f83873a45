//! Outbound notice payload.

mod builder;

pub use builder::NoticeBuilder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One stack frame attached to a notice backtrace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktraceFrame {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl BacktraceFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }
}

/// The structured payload describing one error/event, sent to the remote
/// tracking service. Built fresh per eligible event and discarded after
/// submission; delivery guarantees belong to the notifier client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub api_key: String,
    pub environment: String,
    pub message: String,
    /// Error type for exception notices, absent for plain messages.
    pub kind: Option<String>,
    pub backtrace: Vec<BacktraceFrame>,
    /// Messages of the error's source chain, outermost cause first.
    pub causes: Vec<String>,
    /// Enrichment data; unbounded, owned by whatever enricher is resolved.
    pub context: HashMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}
