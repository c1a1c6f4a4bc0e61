//! Blocking HTTP GET over a shared tokio runtime.
//!
//! Uses async reqwest internally but presents a sync interface: every call
//! blocks the calling thread until one response (or one failure) is
//! available. Must not be called from inside a tokio runtime.

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::TransportError;
use crate::retry::{RetryPolicy, retry_with_backoff};

/// Default connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default whole-request timeout
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Timeouts and retry behaviour for an [`HttpTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub retry: RetryPolicy,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            retry: RetryPolicy::default(),
            user_agent: concat!("alexandria/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One GET request in, one response body out.
///
/// The seam between request building and the network: the executor only
/// ever talks to this trait, so tests can serve canned bodies.
pub trait Transport: Send + Sync {
    /// Fetch `url` and return the body of a 2xx response.
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// [`Transport`] backed by reqwest with retry/backoff.
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpConfig,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn get_once(&self, url: &str) -> Result<String, TransportError> {
        let timeout = self.config.read_timeout;
        SHARED_RUNTIME.handle().block_on(async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| TransportError::from_reqwest(e, timeout))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::from_reqwest(e, timeout))?;

            if status.is_success() {
                Ok(body)
            } else {
                Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let label = strip_query(url);
        retry_with_backoff(label, &self.config.retry, || self.get_once(url))
    }
}

/// URL without its query string, safe to log.
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
