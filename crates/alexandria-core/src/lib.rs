//! Alexandria Core - HTTP plumbing for scholarly metadata API clients
//!
//! This crate provides the blocking transport, error classification,
//! retry policy and logging setup shared by the API clients.

pub mod error;
pub mod http;
pub mod logging;
pub mod retry;

// Re-exports for convenience
pub use error::TransportError;
pub use http::{HttpConfig, HttpTransport, SHARED_RUNTIME, Transport, strip_query};
pub use logging::init_logging;
pub use retry::{RetryPolicy, retry_with_backoff};
