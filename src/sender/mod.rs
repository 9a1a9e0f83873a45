//! Notice submission boundary.
//!
//! Submission is synchronous on the calling thread: the forwarder performs
//! no queueing or reordering, so notices leave in the order events arrive.
//! Client implementations are shared across whatever threads the host logs
//! from and must be `Send + Sync`. Delivery failures (and any retry) are
//! entirely the client's concern.

mod http;

pub use http::{HttpNotifier, NotifierConfig, RequestStats};

use crate::notice::Notice;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("Unsupported endpoint scheme '{scheme}' in '{url}'")]
    UnsupportedScheme { scheme: String, url: String },
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Accepts a completed notice and transmits it.
#[cfg_attr(test, automock)]
pub trait NotifierClient: Send + Sync {
    /// Fire-and-forget submission of one notice.
    fn notify(&self, notice: &Notice) -> Result<(), SenderError>;

    /// The configured endpoint, for logs and diagnostics.
    fn endpoint(&self) -> &str;
}
