//! Author record

use serde::Deserialize;

use super::common::{
    CountsByYear, DehydratedInstitution, SummaryStats, TopicRef, null_as_default, short_id,
    string_or_number,
};
use crate::entity::{EntityKind, Record};

/// OpenAlex Author JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    /// OpenAlex ID (e.g., "https://openalex.org/A5023888391")
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub orcid: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name_alternatives: Vec<String>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    #[serde(default)]
    pub ids: Option<AuthorIds>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<Affiliation>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub last_known_institutions: Vec<DehydratedInstitution>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<TopicRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub counts_by_year: Vec<CountsByYear>,

    /// API URL listing this author's works
    #[serde(default)]
    pub works_api_url: Option<String>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AuthorIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
    #[serde(default)]
    pub scopus: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mag: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Affiliation {
    #[serde(default)]
    pub institution: Option<DehydratedInstitution>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub years: Vec<i32>,
}

impl Author {
    /// ORCID from the top-level field, falling back to `ids.orcid`
    pub fn orcid(&self) -> Option<&str> {
        self.orcid
            .as_deref()
            .or_else(|| self.ids.as_ref().and_then(|ids| ids.orcid.as_deref()))
    }

    pub fn scopus(&self) -> Option<&str> {
        self.ids.as_ref().and_then(|ids| ids.scopus.as_deref())
    }

    pub fn h_index(&self) -> Option<u32> {
        self.summary_stats.as_ref().and_then(|s| s.h_index)
    }

    pub fn i10_index(&self) -> Option<u32> {
        self.summary_stats.as_ref().and_then(|s| s.i10_index)
    }

    /// Short IDs of every institution the author has been affiliated with
    pub fn affiliation_ids(&self) -> Vec<String> {
        self.affiliations
            .iter()
            .filter_map(|a| a.institution.as_ref())
            .filter_map(|i| i.id.as_deref())
            .map(|id| short_id(id).to_string())
            .collect()
    }

    pub fn last_known_institution_ids(&self) -> Vec<String> {
        self.last_known_institutions
            .iter()
            .filter_map(|i| i.id.as_deref())
            .map(|id| short_id(id).to_string())
            .collect()
    }
}

impl Record for Author {
    const KIND: EntityKind = EntityKind::Authors;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.orcid()
    }
}
