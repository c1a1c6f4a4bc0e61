//! In-memory transport for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use alexandria_core::{Transport, TransportError};

/// Serves queued responses in order and records every requested URL.
/// Running out of responses is a network error.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    urls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
    }

    pub fn push_err(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    /// Decoded query parameters of the `n`th request
    pub fn params(&self, n: usize) -> Vec<(String, String)> {
        let url = reqwest::Url::parse(&self.urls()[n]).unwrap();
        url.query_pairs().into_owned().collect()
    }

    pub fn param(&self, n: usize, key: &str) -> Option<String> {
        self.params(n)
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no response queued".into())))
    }
}

/// A list body with `n` author records and the given meta extras
pub(crate) fn author_page(n: usize, count: u64, next_cursor: Option<&str>) -> String {
    let results: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"id": "https://openalex.org/A{}", "display_name": "Author {i}"}}"#, i + 1))
        .collect();
    let cursor = next_cursor.map_or("null".to_string(), |c| format!("\"{c}\""));
    format!(
        r#"{{"meta": {{"count": {count}, "per_page": 25, "next_cursor": {cursor}}}, "results": [{}], "group_by": []}}"#,
        results.join(",")
    )
}
