use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{NotifierClient, SenderError};
use crate::notice::Notice;

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9520/v1/notices".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "notice-forwarder/0.1.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

#[derive(Debug, Default)]
struct ClientStats {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
}

impl ClientStats {
    fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// HTTP notifier client.
///
/// Posts each notice as a JSON body. The request blocks the calling
/// thread until the server responds or the timeout elapses; backpressure
/// is therefore whatever the remote service imposes.
#[derive(Debug)]
pub struct HttpNotifier {
    client: Client,
    config: NotifierConfig,
    endpoint_url: Url,
    stats: Arc<ClientStats>,
}

impl HttpNotifier {
    /// Build the client. Fails fast on a malformed endpoint URL or an
    /// unrecognized scheme, before any event is processed.
    pub fn new(config: NotifierConfig) -> Result<Self, SenderError> {
        let endpoint_url: Url = config
            .endpoint
            .parse()
            .map_err(|e| SenderError::InvalidEndpoint(format!("'{}': {e}", config.endpoint)))?;

        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(SenderError::UnsupportedScheme {
                scheme: endpoint_url.scheme().to_string(),
                url: config.endpoint.clone(),
            });
        }

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SenderError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            endpoint_url,
            stats: Arc::new(ClientStats::default()),
        })
    }

    pub fn request_stats(&self) -> RequestStats {
        RequestStats {
            total_requests: self.stats.total_requests.load(Ordering::Relaxed),
            successful_requests: self.stats.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.stats.failed_requests.load(Ordering::Relaxed),
        }
    }
}

impl NotifierClient for HttpNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), SenderError> {
        debug!(notice_id = %notice.id, "Submitting notice");

        let body = serde_json::to_vec(notice)
            .map_err(|e| SenderError::SerializationError(e.to_string()))?;

        let response = self
            .client
            .post(self.endpoint_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        let success = status.is_success();
        self.stats.record_request(success);

        if success {
            debug!(notice_id = %notice.id, status = status.as_u16(), "Notice accepted");
            Ok(())
        } else {
            warn!(notice_id = %notice.id, status = status.as_u16(), "Notice rejected");
            Err(SenderError::HttpError {
                status: status.as_u16(),
            })
        }
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
