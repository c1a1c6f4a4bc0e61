//! List and group_by response envelopes

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::model::common::null_as_default;

/// Largest page the API serves
pub const MAX_PER_PAGE: u32 = 200;

/// Page size the API uses when `per-page` is not sent
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Deepest `page * per_page` reachable with page-number paging
pub const MAX_OFFSET: u64 = 10_000;

/// `meta` block of a list response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Meta {
    /// Total matches for the query, not just this page
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub db_response_time_ms: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Present while cursor paging has more pages
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub groups_count: Option<u64>,
}

/// One `group_by` bucket
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupResult {
    /// Bucket key; two-dimension groupings join both keys with `|`
    #[serde(deserialize_with = "key_as_string")]
    pub key: String,
    #[serde(default)]
    pub key_display_name: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl GroupResult {
    /// Per-dimension keys of a composite key
    pub fn key_parts(&self) -> Vec<&str> {
        self.key.split('|').collect()
    }
}

/// Keys arrive as strings, numbers or booleans depending on the field
fn key_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// One page of a list or grouped query.
///
/// Exactly one of `results` / `group_by` is populated, decided by whether
/// the query grouped.
#[derive(Debug, Clone)]
pub struct Page<R> {
    pub meta: Meta,
    pub results: Vec<R>,
    pub group_by: Vec<GroupResult>,
}

impl<R> Page<R> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Keep at most `n` results
    pub fn truncate(&mut self, n: usize) {
        self.results.truncate(n);
    }
}

impl<R> IntoIterator for Page<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
struct ListEnvelope<R> {
    #[serde(default)]
    meta: Meta,
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    results: Vec<R>,
}

#[derive(Deserialize)]
struct GroupedEnvelope {
    #[serde(default)]
    meta: Meta,
    #[serde(default, deserialize_with = "null_as_default")]
    group_by: Vec<GroupResult>,
}

impl<R: serde::de::DeserializeOwned> Page<R> {
    /// Decode a list response; `grouped` selects which half is read.
    pub fn from_json(body: &str, grouped: bool) -> Result<Self> {
        let page = if grouped {
            let envelope: GroupedEnvelope = decode(body)?;
            Page {
                meta: envelope.meta,
                results: Vec::new(),
                group_by: envelope.group_by,
            }
        } else {
            let envelope: ListEnvelope<R> = decode(body)?;
            Page {
                meta: envelope.meta,
                results: envelope.results,
                group_by: Vec::new(),
            }
        };

        if let Some(per_page) = page.meta.per_page {
            if per_page > MAX_PER_PAGE {
                return Err(Error::Decode(format!(
                    "per_page {per_page} exceeds maximum {MAX_PER_PAGE}"
                )));
            }
        }
        if page.results.len() > MAX_PER_PAGE as usize {
            return Err(Error::Decode(format!(
                "{} results on one page exceeds maximum {MAX_PER_PAGE}",
                page.results.len()
            )));
        }
        Ok(page)
    }
}

/// Parse a JSON body into `T`
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    sonic_rs::from_str(body).map_err(|e| Error::Decode(e.to_string()))
}
