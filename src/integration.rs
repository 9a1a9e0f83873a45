//! Host logging-framework integration.
//!
//! [`ForwardingLayer`] plugs the forwarder into a `tracing` subscriber
//! stack: every event becomes a [`LogEvent`] and is appended on the thread
//! that emitted it, preserving event order.

use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::event::{LogEvent, Severity};
use crate::forwarder::NoticeForwarder;
use crate::notice::BacktraceFrame;

pub struct ForwardingLayer {
    forwarder: Arc<NoticeForwarder>,
}

impl ForwardingLayer {
    pub fn new(forwarder: Arc<NoticeForwarder>) -> Self {
        Self { forwarder }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" && self.message.is_none() {
            self.message = Some(format!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for ForwardingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // The forwarder's own diagnostics must not feed back into it.
        if metadata.target().starts_with("notice_forwarder") {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = visitor
            .message
            .unwrap_or_else(|| metadata.name().to_string());

        let mut log_event = LogEvent::new(Severity::from(*metadata.level()), message);
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            log_event = log_event.with_caller(BacktraceFrame::new(file, line, metadata.target()));
        }

        self.forwarder.append(&log_event);
    }
}
