//! Topic record

use serde::Deserialize;

use super::common::{HierarchyItem, null_as_default, short_id};
use crate::entity::{EntityKind, Record};

/// OpenAlex Topic JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub subfield: Option<HierarchyItem>,

    #[serde(default)]
    pub field: Option<HierarchyItem>,

    #[serde(default)]
    pub domain: Option<HierarchyItem>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub siblings: Vec<HierarchyItem>,

    #[serde(default)]
    pub ids: Option<TopicIds>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TopicIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
}

impl Topic {
    /// Display names from domain down to subfield
    pub fn hierarchy(&self) -> Vec<&str> {
        [&self.domain, &self.field, &self.subfield]
            .into_iter()
            .filter_map(|level| level.as_ref())
            .filter_map(|item| item.display_name.as_deref())
            .collect()
    }

    pub fn subfield_id(&self) -> Option<&str> {
        self.subfield
            .as_ref()
            .and_then(|s| s.id.as_deref())
            .map(short_id)
    }
}

impl Record for Topic {
    const KIND: EntityKind = EntityKind::Topics;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
