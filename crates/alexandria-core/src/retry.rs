//! Retry with exponential backoff for API requests

use std::time::Duration;

use crate::error::TransportError;

/// When and how often a failed request is attempted again.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one (0 = never retry)
    pub max_retries: u32,
    /// Seconds multiplied by `2^attempt` between attempts
    pub backoff_factor: f64,
    /// HTTP statuses worth another attempt
    pub retry_status_codes: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: 1.0,
            retry_status_codes: vec![429, 500, 503],
        }
    }
}

/// Longest single sleep between attempts
pub const MAX_BACKOFF: Duration = Duration::from_secs(300);

impl RetryPolicy {
    /// Exponential backoff: `backoff_factor * 2^attempt` seconds (2s, 4s, 8s, ... at factor 1),
    /// capped at [`MAX_BACKOFF`]
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let exp = attempt.min(i32::MAX as u32) as i32;
        let secs = self.backoff_factor.max(0.0) * 2f64.powi(exp);
        Duration::try_from_secs_f64(secs).map_or(MAX_BACKOFF, |d| d.min(MAX_BACKOFF))
    }
}

/// Retry a fallible request with exponential backoff.
///
/// On retryable errors, logs the failure, sleeps, and retries up to
/// `policy.max_retries` times.
///
/// Returns `Ok(T)` on first success, or the final `Err` on exhaustion / non-retryable error.
pub fn retry_with_backoff<T>(
    label: &str,
    policy: &RetryPolicy,
    mut attempt_fn: impl FnMut() -> Result<T, TransportError>,
) -> Result<T, TransportError> {
    let mut attempt = 0u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e)
                if attempt < policy.max_retries && e.is_retryable(&policy.retry_status_codes) =>
            {
                attempt += 1;
                let delay = policy.backoff_duration(attempt);
                log::warn!(
                    "{label}: attempt {attempt}/{} failed: {e}, retrying in {delay:?}",
                    policy.max_retries
                );
                std::thread::sleep(delay);
            }
            Err(e) => {
                log::debug!("{label}: giving up after {} attempt(s): {e}", attempt + 1);
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_factor: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn backoff_exponential() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_duration(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_duration(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_duration(3), Duration::from_secs(8));
    }

    #[test]
    fn backoff_scaled_by_factor() {
        let policy = RetryPolicy {
            backoff_factor: 0.5,
            ..Default::default()
        };
        assert_eq!(policy.backoff_duration(1), Duration::from_secs(1));
    }

    #[test]
    fn backoff_capped() {
        let policy = RetryPolicy {
            backoff_factor: 1e300,
            ..Default::default()
        };
        assert_eq!(policy.backoff_duration(1), MAX_BACKOFF);
        assert_eq!(policy.backoff_duration(u32::MAX), MAX_BACKOFF);
        assert_eq!(RetryPolicy::default().backoff_duration(30), MAX_BACKOFF);
    }

    #[test]
    fn default_policy_never_retries() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_backoff("test", &RetryPolicy::default(), || {
            calls += 1;
            Err(TransportError::Network("down".into()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let result = retry_with_backoff("test", &instant_policy(3), || {
            calls += 1;
            if calls < 3 {
                Err(TransportError::Status {
                    status: 503,
                    body: String::new(),
                })
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn non_retryable_status_fails_immediately() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_backoff("test", &instant_policy(5), || {
            calls += 1;
            Err(TransportError::Status {
                status: 404,
                body: String::new(),
            })
        });
        assert_eq!(result.unwrap_err().status(), Some(404));
        assert_eq!(calls, 1);
    }

    #[test]
    fn exhaustion_returns_last_error() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_backoff("test", &instant_policy(2), || {
            calls += 1;
            Err(TransportError::Network("down".into()))
        });
        assert!(matches!(result, Err(TransportError::Network(_))));
        assert_eq!(calls, 3);
    }
}
