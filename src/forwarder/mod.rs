//! The log-event adapter: policy, build, enrich, send.

mod stats;

pub use stats::{ForwardStats, StatsSnapshot};

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::enrich::{Enricher, EnricherRegistry, ResolveError};
use crate::event::LogEvent;
use crate::notice::NoticeBuilder;
use crate::policy;
use crate::sender::{HttpNotifier, NotifierClient, NotifierConfig, SenderError};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Enricher error: {0}")]
    Enricher(#[from] ResolveError),
    #[error("Sender error: {0}")]
    Sender(#[from] SenderError),
}

/// What `append` did with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A notice was built and handed to the notifier client.
    Dispatched,
    /// The dispatch policy declared the event ineligible.
    Suppressed,
    /// An internal fault was absorbed and the event discarded.
    Dropped,
}

/// Forwards eligible log events as notices to the error tracker.
///
/// Immutable after startup: the configuration, the resolved enricher
/// handle, and the client are fixed for the forwarder's lifetime, so the
/// instance can be shared freely across logging threads. Processing is
/// synchronous on the caller's thread with no internal queue, which keeps
/// notices in event order.
pub struct NoticeForwarder {
    config: Config,
    builder: NoticeBuilder,
    enricher: Arc<dyn Enricher>,
    client: Arc<dyn NotifierClient>,
    stats: Arc<ForwardStats>,
}

pub struct ForwarderBuilder {
    config: Config,
    registry: EnricherRegistry,
    default_enricher: Option<Arc<dyn Enricher>>,
    client: Option<Arc<dyn NotifierClient>>,
}

impl ForwarderBuilder {
    fn new(config: Config) -> Self {
        Self {
            config,
            registry: EnricherRegistry::with_builtins(),
            default_enricher: None,
            client: None,
        }
    }

    /// Replace the enricher registry (built-ins included by default).
    pub fn registry(mut self, registry: EnricherRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Default enrichment capability used when no factory identifier is
    /// configured. Host integrations inject this when they know a context
    /// source is available (e.g. an HTTP request scope).
    pub fn default_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.default_enricher = Some(enricher);
        self
    }

    /// Replace the notifier client; otherwise an [`HttpNotifier`] is built
    /// from the configuration.
    pub fn client(mut self, client: Arc<dyn NotifierClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Validate configuration, resolve the enricher, and construct the
    /// forwarder. Configuration faults and enricher resolution faults are
    /// fatal here; missing credentials only warn.
    pub fn build(self) -> Result<NoticeForwarder, StartupError> {
        let warnings = self.config.validate()?;
        for warning in &warnings {
            warn!("{warning}");
        }

        let enricher = self
            .registry
            .resolve(self.config.enricher_factory.as_deref(), self.default_enricher)?;

        let client: Arc<dyn NotifierClient> = match self.client {
            Some(client) => client,
            None => {
                let mut notifier_config = NotifierConfig {
                    timeout: self.config.connection_timeout(),
                    ..NotifierConfig::default()
                };
                if let Some(endpoint) = &self.config.endpoint {
                    notifier_config.endpoint = endpoint.clone();
                }
                Arc::new(HttpNotifier::new(notifier_config)?)
            }
        };

        let builder = NoticeBuilder::new(self.config.api_key.clone(), self.config.environment.clone())
            .with_backtrace_filters(self.config.backtrace_filters.clone());

        info!(
            endpoint = client.endpoint(),
            mode = ?self.config.dispatch_mode,
            enricher = enricher.name(),
            "Notice forwarder started"
        );

        Ok(NoticeForwarder {
            config: self.config,
            builder,
            enricher,
            client,
            stats: Arc::new(ForwardStats::default()),
        })
    }
}

impl NoticeForwarder {
    /// Start a forwarder with the default registry and HTTP client.
    pub fn new(config: Config) -> Result<Self, StartupError> {
        Self::builder(config).build()
    }

    pub fn builder(config: Config) -> ForwarderBuilder {
        ForwarderBuilder::new(config)
    }

    /// Process one log event.
    ///
    /// Runs to completion or drops the event; a fault in here must never
    /// escape into the host's logging call path. Delivery failures stay
    /// with the client and only surface as a warning and a counter.
    pub fn append(&self, event: &LogEvent) -> DispatchOutcome {
        self.stats.record_event();

        if !policy::should_notify(
            self.config.enabled,
            self.config.dispatch_mode,
            event.has_exception(),
        ) {
            self.stats.record_suppressed();
            return DispatchOutcome::Suppressed;
        }

        let mut notice = match &event.exception {
            Some(exception) => self.builder.from_exception(exception, event.timestamp),
            None => self
                .builder
                .from_message(&event.message, event.caller.as_ref(), event.timestamp),
        };

        if let Err(error) = self.enricher.enhance(&mut notice) {
            warn!(
                enricher = self.enricher.name(),
                error = %error,
                "Enrichment failed, dropping event"
            );
            self.stats.record_dropped();
            return DispatchOutcome::Dropped;
        }

        match self.client.notify(&notice) {
            Ok(()) => debug!(notice_id = %notice.id, "Notice dispatched"),
            Err(error) => {
                warn!(notice_id = %notice.id, error = %error, "Notice delivery failed");
                self.stats.record_send_failure();
            }
        }
        self.stats.record_dispatched();
        DispatchOutcome::Dispatched
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the resolved enricher ("noop" when none).
    pub fn enricher_name(&self) -> &str {
        self.enricher.name()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
