//! Transport-level error classification

use std::time::Duration;

/// Failure while performing a single HTTP request.
///
/// Distinguishes a response the server actually sent (non-2xx status) from a
/// request that never produced one (network failure, timeout). Retry policy is
/// decided from this classification, see [`TransportError::is_retryable`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Connection, TLS or protocol failure before a status was received
    #[error("network error: {0}")]
    Network(String),
    /// No response within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl TransportError {
    /// Classify a reqwest error.
    ///
    /// The message is built without the request URL so credentials carried in
    /// the query string never reach logs.
    pub fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            return Self::Timeout(timeout);
        }
        if let Some(status) = e.status() {
            return Self::Status {
                status: status.as_u16(),
                body: String::new(),
            };
        }
        Self::Network(e.without_url().to_string())
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether another attempt may succeed.
    ///
    /// Status codes are only retried when listed in `retry_status_codes`;
    /// network failures and timeouts are always retryable.
    pub fn is_retryable(&self, retry_status_codes: &[u16]) -> bool {
        match self {
            Self::Status { status, .. } => retry_status_codes.contains(status),
            Self::Network(_) | Self::Timeout(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_CODES: &[u16] = &[429, 500, 503];

    fn status_err(status: u16) -> TransportError {
        TransportError::Status {
            status,
            body: "test".to_string(),
        }
    }

    #[test]
    fn status_429_retryable() {
        assert!(status_err(429).is_retryable(DEFAULT_CODES));
    }

    #[test]
    fn status_503_retryable() {
        assert!(status_err(503).is_retryable(DEFAULT_CODES));
    }

    #[test]
    fn status_404_not_retryable() {
        assert!(!status_err(404).is_retryable(DEFAULT_CODES));
    }

    #[test]
    fn status_502_not_retryable_unless_listed() {
        assert!(!status_err(502).is_retryable(DEFAULT_CODES));
        assert!(status_err(502).is_retryable(&[502]));
    }

    #[test]
    fn network_retryable() {
        let err = TransportError::Network("connection refused".to_string());
        assert!(err.is_retryable(&[]));
    }

    #[test]
    fn timeout_retryable() {
        let err = TransportError::Timeout(Duration::from_secs(10));
        assert!(err.is_retryable(&[]));
    }

    #[test]
    fn status_accessor() {
        assert_eq!(status_err(404).status(), Some(404));
        assert_eq!(TransportError::Network("x".into()).status(), None);
    }

    #[test]
    fn display_status() {
        assert_eq!(format!("{}", status_err(404)), "HTTP 404: test");
    }

    #[test]
    fn display_network() {
        let err = TransportError::Network("reset".to_string());
        assert_eq!(format!("{err}"), "network error: reset");
    }
}
