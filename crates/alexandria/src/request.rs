//! Request descriptor: endpoint path plus query parameters
//!
//! Produced by a validated [`crate::Query`], consumed by the
//! [`crate::Executor`]. Holds no credentials; those are added when the URL
//! is sent.

use reqwest::Url;

use crate::entity::EntityKind;
use crate::id::EntityId;

/// One API GET, minus base URL and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    path: Vec<String>,
    params: Vec<(String, String)>,
}

impl Request {
    /// `/{entity}` list endpoint
    pub fn list(kind: EntityKind) -> Self {
        Self {
            path: vec![kind.path().to_string()],
            params: Vec::new(),
        }
    }

    /// `/{entity}/{id}` single lookup
    pub fn entity(kind: EntityKind, id: &EntityId) -> Self {
        Self {
            path: vec![kind.path().to_string(), id.path_segment()],
            params: Vec::new(),
        }
    }

    /// `/{entity}/random`
    pub fn random(kind: EntityKind) -> Self {
        Self {
            path: vec![kind.path().to_string(), "random".to_string()],
            params: Vec::new(),
        }
    }

    /// `/autocomplete/{entity}`
    pub fn autocomplete(kind: EntityKind) -> Self {
        Self {
            path: vec!["autocomplete".to_string(), kind.path().to_string()],
            params: Vec::new(),
        }
    }

    /// Set `key` to `value`, replacing an earlier value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key.to_string(), value)),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Path relative to the base URL, e.g. `works/doi:10.7717/peerj.4375`
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    /// Absolute URL under `base`.
    ///
    /// The path is set verbatim rather than segment by segment: DOIs keep
    /// their `/` so the API sees `works/doi:10.1/abc`, not `works/doi:10.1%2Fabc`.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let base_path = base.path().trim_end_matches('/');
        url.set_path(&format!("{base_path}/{}", self.path()));
        url.set_query(None);
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        url
    }
}
