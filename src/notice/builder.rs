use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::{BacktraceFrame, Notice};
use crate::event::ExceptionInfo;

/// Assembles notices from log events.
///
/// Building never fails: missing credentials are surfaced as startup
/// warnings, and a notice is still produced so that a misconfigured
/// forwarder degrades to rejected notices instead of disrupting the
/// host's logging flow.
#[derive(Debug, Clone)]
pub struct NoticeBuilder {
    api_key: String,
    environment: String,
    backtrace_filters: Vec<String>,
}

impl NoticeBuilder {
    pub fn new(api_key: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment: environment.into(),
            backtrace_filters: Vec::new(),
        }
    }

    /// Function-name prefixes to drop from notice backtraces
    /// (e.g. runtime or framework internals).
    pub fn with_backtrace_filters(mut self, filters: Vec<String>) -> Self {
        self.backtrace_filters = filters;
        self
    }

    /// Build a notice for an event carrying an exception. The notice
    /// message is the exception's own message.
    pub fn from_exception(&self, exception: &ExceptionInfo, occurred_at: DateTime<Utc>) -> Notice {
        let mut notice = self.base(exception.message.clone(), occurred_at);
        notice.kind = Some(exception.kind.clone());
        notice.backtrace = self.filtered_frames(&exception.backtrace);
        notice.causes = exception.causes.clone();
        notice
    }

    /// Build a notice for a plain message event. The only trace available
    /// is the call site itself, so the backtrace is at most one frame.
    pub fn from_message(
        &self,
        message: &str,
        caller: Option<&BacktraceFrame>,
        occurred_at: DateTime<Utc>,
    ) -> Notice {
        let mut notice = self.base(message.to_string(), occurred_at);
        notice.backtrace = caller.cloned().into_iter().collect();
        notice
    }

    fn base(&self, message: String, occurred_at: DateTime<Utc>) -> Notice {
        Notice {
            id: Uuid::new_v4(),
            api_key: self.api_key.clone(),
            environment: self.environment.clone(),
            message,
            kind: None,
            backtrace: Vec::new(),
            causes: Vec::new(),
            context: HashMap::new(),
            occurred_at,
        }
    }

    fn filtered_frames(&self, frames: &[BacktraceFrame]) -> Vec<BacktraceFrame> {
        frames
            .iter()
            .filter(|frame| {
                !self
                    .backtrace_filters
                    .iter()
                    .any(|prefix| frame.function.starts_with(prefix))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(function: &str) -> BacktraceFrame {
        BacktraceFrame::new("src/lib.rs", 1, function)
    }

    #[test]
    fn test_exception_notice_carries_exception_message_and_environment() {
        let builder = NoticeBuilder::new("key", "production");
        let exception = ExceptionInfo::new("NullPointerException", "NullPointerException: x is null");

        let notice = builder.from_exception(&exception, Utc::now());

        assert_eq!(notice.message, "NullPointerException: x is null");
        assert_eq!(notice.environment, "production");
        assert_eq!(notice.kind.as_deref(), Some("NullPointerException"));
    }

    #[test]
    fn test_exception_notice_keeps_frame_order() {
        let builder = NoticeBuilder::new("key", "test");
        let exception = ExceptionInfo::new("io::Error", "boom")
            .with_backtrace(vec![frame("app::inner"), frame("app::outer")]);

        let notice = builder.from_exception(&exception, Utc::now());

        let functions: Vec<&str> = notice
            .backtrace
            .iter()
            .map(|frame| frame.function.as_str())
            .collect();
        assert_eq!(functions, vec!["app::inner", "app::outer"]);
    }

    #[test]
    fn test_backtrace_filters_drop_matching_frames() {
        let builder = NoticeBuilder::new("key", "test")
            .with_backtrace_filters(vec!["tokio::".to_string(), "std::".to_string()]);
        let exception = ExceptionInfo::new("io::Error", "boom").with_backtrace(vec![
            frame("app::handler"),
            frame("tokio::runtime::task"),
            frame("std::panicking::begin_panic"),
        ]);

        let notice = builder.from_exception(&exception, Utc::now());

        assert_eq!(notice.backtrace.len(), 1);
        assert_eq!(notice.backtrace[0].function, "app::handler");
    }

    #[test]
    fn test_plain_message_notice_has_single_caller_frame() {
        let builder = NoticeBuilder::new("key", "staging");
        let caller = frame("app::main");

        let notice = builder.from_message("something happened", Some(&caller), Utc::now());

        assert_eq!(notice.message, "something happened");
        assert_eq!(notice.backtrace, vec![caller]);
        assert_eq!(notice.kind, None);
    }

    #[test]
    fn test_plain_message_notice_without_caller() {
        let builder = NoticeBuilder::new("key", "staging");

        let notice = builder.from_message("no call site", None, Utc::now());

        assert!(notice.backtrace.is_empty());
    }

    #[test]
    fn test_empty_api_key_still_builds() {
        let builder = NoticeBuilder::new("", "");

        let notice = builder.from_message("degraded", None, Utc::now());

        assert_eq!(notice.api_key, "");
        assert_eq!(notice.environment, "");
        assert_eq!(notice.message, "degraded");
    }

    #[test]
    fn test_each_notice_gets_a_fresh_id() {
        let builder = NoticeBuilder::new("key", "test");

        let first = builder.from_message("a", None, Utc::now());
        let second = builder.from_message("b", None, Utc::now());

        assert_ne!(first.id, second.id);
    }
}
