//! Institution record

use serde::Deserialize;

use super::common::{
    CountsByYear, SummaryStats, TopicRef, null_as_default, short_ids, string_or_number,
};
use crate::entity::{EntityKind, Record};

/// OpenAlex Institution JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Institution {
    #[serde(default)]
    pub id: Option<String>,

    /// ROR ID as URL
    #[serde(default)]
    pub ror: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name_acronyms: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name_alternatives: Vec<String>,

    /// education, healthcare, company, government, ...
    #[serde(rename = "type", default)]
    pub institution_type: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub geo: Option<Geo>,

    #[serde(default)]
    pub homepage_url: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub ids: Option<InstitutionIds>,

    /// This institution followed by its parents, up to the root
    #[serde(default, deserialize_with = "null_as_default")]
    pub lineage: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub associated_institutions: Vec<AssociatedInstitution>,

    #[serde(default)]
    pub is_super_system: Option<bool>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

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
pub struct InstitutionIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub ror: Option<String>,
    #[serde(default)]
    pub grid: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mag: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Geo {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssociatedInstitution {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// parent, child or related
    #[serde(default)]
    pub relationship: Option<String>,
}

impl Institution {
    /// Short IDs from this institution up to its root
    pub fn lineage_ids(&self) -> Vec<String> {
        short_ids(&self.lineage)
    }

    /// Short IDs of associated institutions with the given relationship
    pub fn associated_ids(&self, relationship: &str) -> Vec<String> {
        short_ids(
            self.associated_institutions
                .iter()
                .filter(|a| a.relationship.as_deref() == Some(relationship))
                .filter_map(|a| a.id.as_ref()),
        )
    }

    pub fn h_index(&self) -> Option<u32> {
        self.summary_stats.as_ref().and_then(|s| s.h_index)
    }
}

impl Record for Institution {
    const KIND: EntityKind = EntityKind::Institutions;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.ror.as_deref()
    }
}
