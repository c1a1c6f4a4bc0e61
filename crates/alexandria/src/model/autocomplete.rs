//! Lightweight typeahead results from `/autocomplete/{entity}`

use serde::Deserialize;

use super::common::{null_as_default, short_id};

/// One autocomplete match
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AutocompleteResult {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Disambiguation text (an author's last institution, a work's authors, ...)
    #[serde(default)]
    pub hint: Option<String>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub works_count: Option<u64>,

    /// Singular entity name, e.g. "author"
    #[serde(default)]
    pub entity_type: Option<String>,

    /// Canonical external ID (ORCID, DOI, ROR, ...)
    #[serde(default)]
    pub external_id: Option<String>,
}

impl AutocompleteResult {
    pub fn short_id(&self) -> Option<&str> {
        self.id.as_deref().map(short_id)
    }
}

/// Response envelope; autocomplete answers carry no paging cursor
#[derive(Debug, Deserialize)]
pub(crate) struct AutocompleteResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<AutocompleteResult>,
}
