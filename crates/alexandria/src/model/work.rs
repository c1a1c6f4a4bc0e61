//! Work record

use serde::Deserialize;

use super::common::{
    CountsByYear, DehydratedConcept, DehydratedInstitution, TopicRef, null_as_default, short_id,
    short_ids, string_or_number,
};
use crate::abstract_decode::{InvertedIndex, decode_inverted_index};
use crate::entity::{EntityKind, Record};

/// OpenAlex Work JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Work {
    /// OpenAlex ID (e.g., "https://openalex.org/W2741809807")
    #[serde(default)]
    pub id: Option<String>,

    /// Digital Object Identifier as URL
    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Display name (usually same as title)
    #[serde(default)]
    pub display_name: Option<String>,

    /// Publication date (ISO 8601)
    #[serde(default)]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub publication_year: Option<i32>,

    /// Language (ISO 639-1)
    #[serde(default)]
    pub language: Option<String>,

    /// Work type (article, preprint, book, etc.)
    #[serde(rename = "type", default)]
    pub work_type: Option<String>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub is_retracted: Option<bool>,

    #[serde(default)]
    pub open_access: Option<OpenAccess>,

    /// Abstract as inverted index, see [`Work::abstract_text`]
    #[serde(default)]
    pub abstract_inverted_index: Option<InvertedIndex>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub authorships: Vec<Authorship>,

    #[serde(default)]
    pub primary_topic: Option<TopicRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<TopicRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub concepts: Vec<DehydratedConcept>,

    /// Primary location (source/venue info)
    #[serde(default)]
    pub primary_location: Option<Location>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<Location>,

    /// IDs from other systems
    #[serde(default)]
    pub ids: Option<WorkIds>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub referenced_works: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub related_works: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub counts_by_year: Vec<CountsByYear>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct OpenAccess {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_oa: bool,
    #[serde(default)]
    pub oa_status: Option<String>,
    #[serde(default)]
    pub oa_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Authorship {
    /// "first", "middle" or "last"
    #[serde(default)]
    pub author_position: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institutions: Vec<DehydratedInstitution>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
    #[serde(default)]
    pub is_corresponding: Option<bool>,
    #[serde(default)]
    pub raw_author_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthorRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub is_oa: Option<bool>,
    #[serde(default)]
    pub landing_page_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<SourceRef>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SourceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub issn_l: Option<String>,
    #[serde(rename = "type", default)]
    pub source_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct WorkIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub pmid: Option<String>,
    #[serde(default)]
    pub pmcid: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mag: Option<String>,
}

impl Work {
    /// Decode abstract from inverted index
    pub fn abstract_text(&self) -> Option<String> {
        self.abstract_inverted_index
            .as_ref()
            .map(decode_inverted_index)
            .filter(|s| !s.is_empty())
    }

    /// Short author IDs in authorship order
    pub fn author_ids(&self) -> Vec<String> {
        self.authorships
            .iter()
            .filter_map(|a| a.author.as_ref())
            .filter_map(|a| a.id.as_deref())
            .map(|id| short_id(id).to_string())
            .collect()
    }

    /// Institution IDs from authorships (deduplicated)
    pub fn institution_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .authorships
            .iter()
            .flat_map(|a| &a.institutions)
            .filter_map(|i| i.id.as_deref())
            .map(|id| short_id(id).to_string())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn referenced_work_ids(&self) -> Vec<String> {
        short_ids(&self.referenced_works)
    }

    pub fn is_oa(&self) -> bool {
        self.open_access.as_ref().is_some_and(|oa| oa.is_oa)
    }

    pub fn pmid(&self) -> Option<&str> {
        self.ids.as_ref().and_then(|ids| ids.pmid.as_deref())
    }

    /// Source (journal, repository, ...) of the primary location
    pub fn primary_source(&self) -> Option<&SourceRef> {
        self.primary_location.as_ref().and_then(|l| l.source.as_ref())
    }
}

impl Record for Work {
    const KIND: EntityKind = EntityKind::Works;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.doi.as_deref()
    }
}
