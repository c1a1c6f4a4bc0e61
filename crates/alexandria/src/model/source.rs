//! Source record (journals, repositories, conferences)

use serde::Deserialize;

use super::common::{
    CountsByYear, SummaryStats, TopicRef, id_or_object, null_as_default, short_id, short_ids,
    string_or_number,
};
use crate::entity::{EntityKind, Record};

/// OpenAlex Source JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,

    /// Linking ISSN
    #[serde(default)]
    pub issn_l: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub issn: Vec<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub abbreviated_title: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub alternate_titles: Vec<String>,

    /// journal, repository, conference, ebook platform, book series
    #[serde(rename = "type", default)]
    pub source_type: Option<String>,

    #[serde(default)]
    pub is_oa: Option<bool>,

    #[serde(default)]
    pub is_in_doaj: Option<bool>,

    /// Publisher or institution hosting this source
    #[serde(default, deserialize_with = "id_or_object")]
    pub host_organization: Option<String>,

    #[serde(default)]
    pub host_organization_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub host_organization_lineage: Vec<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    /// Article processing charge in USD
    #[serde(default)]
    pub apc_usd: Option<u32>,

    #[serde(default)]
    pub homepage_url: Option<String>,

    #[serde(default)]
    pub ids: Option<SourceIds>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<TopicRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub counts_by_year: Vec<CountsByYear>,

    #[serde(default)]
    pub works_api_url: Option<String>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SourceIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub issn_l: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issn: Vec<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mag: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    #[serde(default)]
    pub fatcat: Option<String>,
}

impl Source {
    pub fn h_index(&self) -> Option<u32> {
        self.summary_stats.as_ref().and_then(|s| s.h_index)
    }

    /// Short ID of the hosting organization (a publisher `P...` or institution `I...`)
    pub fn host_organization_id(&self) -> Option<&str> {
        self.host_organization.as_deref().map(short_id)
    }

    pub fn host_organization_lineage_ids(&self) -> Vec<String> {
        short_ids(&self.host_organization_lineage)
    }
}

impl Record for Source {
    const KIND: EntityKind = EntityKind::Sources;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.issn_l.as_deref()
    }
}
