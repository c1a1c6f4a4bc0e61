//! Publisher record

use serde::Deserialize;

use super::common::{
    CountsByYear, SummaryStats, id_or_object, null_as_default, short_id, short_ids,
};
use crate::entity::{EntityKind, Record};

/// OpenAlex Publisher JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Publisher {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub alternate_titles: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub country_codes: Vec<String>,

    /// 0 for top-level publishers, 1 for their imprints, ...
    #[serde(default)]
    pub hierarchy_level: Option<u32>,

    #[serde(default, deserialize_with = "id_or_object")]
    pub parent_publisher: Option<String>,

    /// This publisher followed by its parents, up to the root
    #[serde(default, deserialize_with = "null_as_default")]
    pub lineage: Vec<String>,

    #[serde(default)]
    pub ids: Option<PublisherIds>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub homepage_url: Option<String>,

    /// API URL listing sources hosted by this publisher
    #[serde(default)]
    pub sources_api_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub counts_by_year: Vec<CountsByYear>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct PublisherIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub ror: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
}

impl Publisher {
    pub fn ror(&self) -> Option<&str> {
        self.ids.as_ref().and_then(|ids| ids.ror.as_deref())
    }

    pub fn wikidata(&self) -> Option<&str> {
        self.ids.as_ref().and_then(|ids| ids.wikidata.as_deref())
    }

    pub fn parent_publisher_id(&self) -> Option<&str> {
        self.parent_publisher.as_deref().map(short_id)
    }

    /// Short IDs from this publisher up to its root
    pub fn lineage_ids(&self) -> Vec<String> {
        short_ids(&self.lineage)
    }

    pub fn h_index(&self) -> Option<u32> {
        self.summary_stats.as_ref().and_then(|s| s.h_index)
    }

    pub fn i10_index(&self) -> Option<u32> {
        self.summary_stats.as_ref().and_then(|s| s.i10_index)
    }
}

impl Record for Publisher {
    const KIND: EntityKind = EntityKind::Publishers;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.ror()
    }
}
