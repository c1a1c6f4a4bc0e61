//! Entity identifier normalization
//!
//! The API accepts the same entity under several spellings:
//!
//! - canonical OpenAlex IDs: `A5023888391`, `https://openalex.org/A5023888391`
//! - URN-style external IDs: `orcid:0000-0001-6187-6610`, `wikidata:Q746413`
//! - external URLs: `https://orcid.org/0000-0001-6187-6610`, `https://ror.org/02y3ad647`,
//!   `https://en.wikipedia.org/wiki/Medicine`, Scopus author pages
//!
//! [`EntityId::parse`] folds all of them into one `(namespace, value)` pair so
//! equivalent inputs produce identical requests.

use std::fmt;
use std::str::FromStr;

use crate::entity::EntityKind;
use crate::error::{Error, Result};

/// Identifier system an [`EntityId`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdNamespace {
    OpenAlex,
    Doi,
    Orcid,
    Ror,
    Wikidata,
    Scopus,
    Twitter,
    Mag,
    Wikipedia,
    Pmid,
    Pmcid,
    Issn,
}

impl IdNamespace {
    const ALL: [IdNamespace; 12] = [
        Self::OpenAlex,
        Self::Doi,
        Self::Orcid,
        Self::Ror,
        Self::Wikidata,
        Self::Scopus,
        Self::Twitter,
        Self::Mag,
        Self::Wikipedia,
        Self::Pmid,
        Self::Pmcid,
        Self::Issn,
    ];

    /// URN prefix (the part before `:`)
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::OpenAlex => "openalex",
            Self::Doi => "doi",
            Self::Orcid => "orcid",
            Self::Ror => "ror",
            Self::Wikidata => "wikidata",
            Self::Scopus => "scopus",
            Self::Twitter => "twitter",
            Self::Mag => "mag",
            Self::Wikipedia => "wikipedia",
            Self::Pmid => "pmid",
            Self::Pmcid => "pmcid",
            Self::Issn => "issn",
        }
    }

    /// Parse a URN prefix (case-insensitive)
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let prefix = prefix.to_ascii_lowercase();
        Self::ALL.into_iter().find(|ns| ns.prefix() == prefix)
    }

    /// Filter key for matching many IDs of this namespace in one list request.
    ///
    /// `None` for namespaces the API offers no OR-able filter for.
    pub fn filter_key(&self) -> Option<&'static str> {
        match self {
            Self::OpenAlex => Some("openalex"),
            Self::Doi => Some("doi"),
            Self::Orcid => Some("orcid"),
            Self::Ror => Some("ror"),
            Self::Mag => Some("mag"),
            Self::Pmid => Some("pmid"),
            Self::Pmcid => Some("pmcid"),
            Self::Issn => Some("issn"),
            Self::Wikidata | Self::Scopus | Self::Twitter | Self::Wikipedia => None,
        }
    }
}

impl fmt::Display for IdNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A normalized identifier for one entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    namespace: IdNamespace,
    value: String,
}

impl EntityId {
    /// Normalize any accepted spelling of an identifier.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::invalid("empty identifier"));
        }

        if let Some(rest) = strip_scheme(raw) {
            return Self::from_url(rest, raw);
        }

        if let Some((prefix, value)) = raw.split_once(':') {
            if let Some(namespace) = IdNamespace::from_prefix(prefix) {
                return Self::with_namespace(namespace, value, raw);
            }
        }

        if raw.starts_with("10.") && raw.contains('/') {
            return Self::with_namespace(IdNamespace::Doi, raw, raw);
        }

        if is_openalex_key(raw) {
            return Ok(Self::openalex(raw));
        }

        Err(Error::invalid(format!("unrecognised identifier: {raw}")))
    }

    pub fn namespace(&self) -> IdNamespace {
        self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Entity kind implied by an OpenAlex ID's letter prefix
    pub fn entity_kind(&self) -> Option<EntityKind> {
        if self.namespace != IdNamespace::OpenAlex {
            return None;
        }
        self.value.chars().next().and_then(EntityKind::from_id_prefix)
    }

    /// Check an OpenAlex ID belongs to `kind`. External IDs always pass.
    pub fn ensure_kind(&self, kind: EntityKind) -> Result<()> {
        match self.entity_kind() {
            Some(found) if found != kind => Err(Error::invalid(format!(
                "{} is a {found} ID, not {kind}",
                self.value
            ))),
            _ => Ok(()),
        }
    }

    /// Path segment for single-entity lookup: `A123` or `orcid:0000-...`
    pub fn path_segment(&self) -> String {
        match self.namespace {
            IdNamespace::OpenAlex => self.value.clone(),
            ns => format!("{}:{}", ns.prefix(), self.value),
        }
    }

    fn openalex(key: &str) -> Self {
        Self {
            namespace: IdNamespace::OpenAlex,
            value: key.to_ascii_uppercase(),
        }
    }

    fn with_namespace(namespace: IdNamespace, value: &str, raw: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::invalid(format!("identifier has no value: {raw}")));
        }
        if namespace == IdNamespace::OpenAlex {
            let key = strip_scheme(value)
                .map(|rest| rest.rsplit('/').next().unwrap_or(rest))
                .unwrap_or(value);
            if !is_openalex_key(key) {
                return Err(Error::invalid(format!("malformed OpenAlex ID: {raw}")));
            }
            return Ok(Self::openalex(key));
        }
        let value = match namespace {
            IdNamespace::Doi => value.to_ascii_lowercase(),
            _ => value.to_string(),
        };
        Ok(Self { namespace, value })
    }

    /// `rest` is the URL with its scheme stripped
    fn from_url(rest: &str, raw: &str) -> Result<Self> {
        let rest = rest.strip_prefix("www.").unwrap_or(rest);
        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        let path = path.trim_end_matches('/');
        let last = path.rsplit('/').next().unwrap_or(path);

        let (namespace, value) = match host.to_ascii_lowercase().as_str() {
            "openalex.org" | "api.openalex.org" => (IdNamespace::OpenAlex, last),
            "orcid.org" => (IdNamespace::Orcid, last),
            "ror.org" => (IdNamespace::Ror, last),
            "wikidata.org" => (IdNamespace::Wikidata, last),
            // DOIs contain slashes: keep the whole path
            "doi.org" | "dx.doi.org" => (IdNamespace::Doi, path),
            "pubmed.ncbi.nlm.nih.gov" => (IdNamespace::Pmid, last),
            "twitter.com" | "x.com" => (IdNamespace::Twitter, last),
            "ncbi.nlm.nih.gov" if path.starts_with("pmc/") => (IdNamespace::Pmcid, last),
            h if h == "wikipedia.org" || h.ends_with(".wikipedia.org") => {
                (IdNamespace::Wikipedia, last)
            }
            // https://www.scopus.com/authid/detail.uri?authorId=36455008000
            "scopus.com" => {
                let author_id = path
                    .split_once('?')
                    .and_then(|(_, query)| {
                        query
                            .split('&')
                            .find_map(|pair| pair.strip_prefix("authorId="))
                    })
                    .ok_or_else(|| Error::invalid(format!("Scopus URL has no authorId: {raw}")))?;
                (IdNamespace::Scopus, author_id)
            }
            _ => return Err(Error::invalid(format!("unrecognised identifier URL: {raw}"))),
        };
        Self::with_namespace(namespace, value, raw)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_segment())
    }
}

fn strip_scheme(raw: &str) -> Option<&str> {
    raw.strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
}

/// Letter prefix of a known entity kind followed by digits, e.g. `W2741809807`
fn is_openalex_key(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let digits = chars.as_str();
    EntityKind::from_id_prefix(first).is_some()
        && !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
}
