//! Client entry point

use std::sync::Arc;

use alexandria_core::{HttpTransport, Transport};
use reqwest::Url;

use crate::config::Config;
use crate::entity::Record;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::model::{
    AutocompleteResult, Author, Concept, Funder, Institution, Publisher, Source, Topic, Work,
};
use crate::query::Query;

/// Blocking OpenAlex API client.
///
/// Cheap to share by reference; every query borrows it and owns no state
/// across calls.
///
/// ```no_run
/// use alexandria::{Config, OpenAlex};
///
/// let client = OpenAlex::new(Config::default().with_email("me@example.org"))?;
/// let page = client.authors().filter("has_orcid", true).get()?;
/// println!("{} authors have an ORCID", page.meta.count);
/// # Ok::<(), alexandria::Error>(())
/// ```
pub struct OpenAlex {
    executor: Executor,
}

impl OpenAlex {
    /// Client over HTTP with the configured timeouts and retry policy
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.http.to_http_config())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Client over any [`Transport`], e.g. a test double
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("base_url {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base_url {:?} cannot hold a path",
                config.base_url
            )));
        }
        log::debug!(
            "OpenAlex client for {base_url} (polite pool: {}, api key: {})",
            config.email.is_some(),
            config.api_key.is_some()
        );
        Ok(Self {
            executor: Executor::new(transport, base_url, config.email, config.api_key),
        })
    }

    /// Client from [`Config::load`]
    pub fn load() -> anyhow::Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config)?)
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Empty query over the endpoint of `R`
    pub fn query<R: Record>(&self) -> Query<'_, R> {
        Query::new(&self.executor)
    }

    pub fn works(&self) -> Query<'_, Work> {
        self.query()
    }

    pub fn authors(&self) -> Query<'_, Author> {
        self.query()
    }

    pub fn sources(&self) -> Query<'_, Source> {
        self.query()
    }

    pub fn institutions(&self) -> Query<'_, Institution> {
        self.query()
    }

    pub fn concepts(&self) -> Query<'_, Concept> {
        self.query()
    }

    pub fn publishers(&self) -> Query<'_, Publisher> {
        self.query()
    }

    pub fn funders(&self) -> Query<'_, Funder> {
        self.query()
    }

    pub fn topics(&self) -> Query<'_, Topic> {
        self.query()
    }

    /// Single record by any accepted identifier spelling
    pub fn get<R: Record>(&self, id: &str) -> Result<R> {
        self.query::<R>().by_id(id)
    }

    /// Typeahead matches among `R` entities
    pub fn autocomplete<R: Record>(&self, q: &str) -> Result<Vec<AutocompleteResult>> {
        self.query::<R>().autocomplete(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;

    fn client(mock: &Arc<MockTransport>) -> OpenAlex {
        let config = Config {
            email: Some("me@example.org".into()),
            api_key: None,
            ..Config::default()
        };
        OpenAlex::with_transport(config, mock.clone()).unwrap()
    }

    #[test]
    fn mailto_on_every_request() {
        let mock = Arc::new(MockTransport::new());
        mock.push_ok(r#"{"id": "https://openalex.org/W1"}"#);
        let client = client(&mock);
        let work: Work = client.get("W1").unwrap();
        assert_eq!(work.short_id(), Some("W1"));
        assert_eq!(mock.param(0, "mailto").as_deref(), Some("me@example.org"));
        assert_eq!(mock.param(0, "api_key"), None);
    }

    #[test]
    fn entity_shortcuts_hit_their_endpoints() {
        let mock = Arc::new(MockTransport::new());
        let client = client(&mock);
        let paths = [
            client.works().to_request().unwrap().path(),
            client.authors().to_request().unwrap().path(),
            client.sources().to_request().unwrap().path(),
            client.institutions().to_request().unwrap().path(),
            client.concepts().to_request().unwrap().path(),
            client.publishers().to_request().unwrap().path(),
            client.funders().to_request().unwrap().path(),
            client.topics().to_request().unwrap().path(),
        ];
        assert_eq!(
            paths,
            [
                "works",
                "authors",
                "sources",
                "institutions",
                "concepts",
                "publishers",
                "funders",
                "topics"
            ]
        );
    }

    #[test]
    fn invalid_base_url() {
        let mock = Arc::new(MockTransport::new());
        let config = Config::default().with_base_url("not a url");
        let result = OpenAlex::with_transport(config, mock.clone());
        assert!(matches!(result, Err(Error::Config(_))));
        let config = Config::default().with_base_url("mailto:me@example.org");
        assert!(matches!(
            OpenAlex::with_transport(config, mock),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn autocomplete_endpoint() {
        let mock = Arc::new(MockTransport::new());
        mock.push_ok(r#"{"results": []}"#);
        let client = client(&mock);
        let hits = client.autocomplete::<Institution>("harv").unwrap();
        assert!(hits.is_empty());
        assert!(mock.urls()[0].starts_with("https://api.openalex.org/autocomplete/institutions?q=harv"));
    }
}
