//! Concept record

use serde::Deserialize;

use super::common::{
    CountsByYear, DehydratedConcept, SummaryStats, null_as_default, short_id, string_or_number,
};
use crate::entity::{EntityKind, Record};

/// OpenAlex Concept JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Concept {
    #[serde(default)]
    pub id: Option<String>,

    /// Wikidata ID as URL
    #[serde(default)]
    pub wikidata: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Depth in the concept tree, 0 = root
    #[serde(default)]
    pub level: Option<u32>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    #[serde(default)]
    pub ids: Option<ConceptIds>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ancestors: Vec<DehydratedConcept>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub related_concepts: Vec<DehydratedConcept>,

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
pub struct ConceptIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mag: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub umls_cui: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub umls_aui: Vec<String>,
}

impl Concept {
    /// Ancestor short IDs, nearest level first
    pub fn ancestor_ids(&self) -> Vec<String> {
        let mut ancestors: Vec<&DehydratedConcept> = self.ancestors.iter().collect();
        ancestors.sort_by_key(|c| std::cmp::Reverse(c.level.unwrap_or(0)));
        ancestors
            .into_iter()
            .filter_map(|c| c.id.as_deref())
            .map(|id| short_id(id).to_string())
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.level == Some(0)
    }
}

impl Record for Concept {
    const KIND: EntityKind = EntityKind::Concepts;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.wikidata.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONCEPT: &str = r#"{
        "id": "https://openalex.org/C2778407487",
        "wikidata": "https://www.wikidata.org/wiki/Q14565201",
        "display_name": "Altmetrics",
        "level": 2,
        "works_count": 4500,
        "ancestors": [
            {"id": "https://openalex.org/C41008148", "display_name": "Computer science", "level": 0},
            {"id": "https://openalex.org/C136764020", "display_name": "World Wide Web", "level": 1}
        ],
        "related_concepts": [
            {"id": "https://openalex.org/C1", "display_name": "Citation", "level": 2, "score": 4.2}
        ]
    }"#;

    #[test]
    fn parse_concept() {
        let concept: Concept = serde_json::from_str(SAMPLE_CONCEPT).unwrap();
        assert_eq!(concept.short_id(), Some("C2778407487"));
        assert_eq!(concept.level, Some(2));
        assert!(!concept.is_root());
        assert_eq!(concept.related_concepts[0].score, Some(4.2));
    }

    #[test]
    fn ancestors_nearest_first() {
        let concept: Concept = serde_json::from_str(SAMPLE_CONCEPT).unwrap();
        assert_eq!(concept.ancestor_ids(), vec!["C136764020", "C41008148"]);
    }

    #[test]
    fn canonical_id_is_wikidata() {
        let concept: Concept = serde_json::from_str(SAMPLE_CONCEPT).unwrap();
        assert_eq!(
            concept.canonical_external_id(),
            Some("https://www.wikidata.org/wiki/Q14565201")
        );
    }

    #[test]
    fn root_concept() {
        let json = r#"{"id": "https://openalex.org/C41008148", "level": 0}"#;
        let concept: Concept = serde_json::from_str(json).unwrap();
        assert!(concept.is_root());
        assert!(concept.ancestor_ids().is_empty());
    }
}
