//! One request descriptor in, one HTTP GET out, one parsed response back

use std::sync::Arc;

use alexandria_core::{Transport, strip_query};
use reqwest::Url;

use crate::entity::Record;
use crate::error::{Error, Result};
use crate::model::AutocompleteResult;
use crate::model::autocomplete::AutocompleteResponse;
use crate::request::Request;
use crate::response::{Page, decode};

/// Sends requests for a client.
///
/// Adds the polite-pool `mailto` and the `api_key` to every URL, issues
/// exactly one [`Transport::get`] per call and maps failures onto
/// [`Error`]. Keeps no state between calls.
pub struct Executor {
    transport: Arc<dyn Transport>,
    base_url: Url,
    mailto: Option<String>,
    api_key: Option<String>,
}

impl Executor {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: Url,
        mailto: Option<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            transport,
            base_url,
            mailto,
            api_key,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for `request`, credentials included
    pub fn url(&self, request: &Request) -> Url {
        let mut url = request.url(&self.base_url);
        let credentials = [("mailto", &self.mailto), ("api_key", &self.api_key)];
        if credentials.iter().any(|(_, v)| v.is_some()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in credentials {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }
        }
        url
    }

    fn fetch(&self, request: &Request) -> Result<String> {
        let url = self.url(request);
        // Logged without credentials
        log::debug!("GET {}", request.url(&self.base_url));
        let body = self.transport.get(url.as_str())?;
        log::trace!("{} returned {} bytes", strip_query(url.as_str()), body.len());
        Ok(body)
    }

    /// List or grouped page
    pub fn page<R: Record>(&self, request: &Request, grouped: bool) -> Result<Page<R>> {
        let body = self.fetch(request)?;
        Page::from_json(&body, grouped)
    }

    /// Single record; a 404 becomes [`Error::NotFound`] naming `id`
    pub fn one<R: Record>(&self, request: &Request, id: &str) -> Result<R> {
        match self.fetch(request) {
            Ok(body) => decode(&body),
            Err(Error::Remote { status: 404, .. }) => Err(Error::NotFound {
                kind: R::KIND,
                id: id.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub fn autocomplete(&self, request: &Request) -> Result<Vec<AutocompleteResult>> {
        let body = self.fetch(request)?;
        let response: AutocompleteResponse = decode(&body)?;
        Ok(response.results)
    }
}
