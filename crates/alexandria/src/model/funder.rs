//! Funder record

use serde::Deserialize;

use super::common::{CountsByYear, SummaryStats, null_as_default};
use crate::entity::{EntityKind, Record};

/// OpenAlex Funder JSON structure
#[derive(Debug, Clone, Deserialize)]
pub struct Funder {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub alternate_titles: Vec<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub homepage_url: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub ids: Option<FunderIds>,

    #[serde(default)]
    pub grants_count: Option<u64>,

    #[serde(default)]
    pub works_count: Option<u64>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub counts_by_year: Vec<CountsByYear>,

    #[serde(default)]
    pub created_date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct FunderIds {
    #[serde(default)]
    pub openalex: Option<String>,
    #[serde(default)]
    pub ror: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    #[serde(default)]
    pub crossref: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
}

impl Funder {
    pub fn ror(&self) -> Option<&str> {
        self.ids.as_ref().and_then(|ids| ids.ror.as_deref())
    }

    pub fn crossref(&self) -> Option<&str> {
        self.ids.as_ref().and_then(|ids| ids.crossref.as_deref())
    }
}

impl Record for Funder {
    const KIND: EntityKind = EntityKind::Funders;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn canonical_external_id(&self) -> Option<&str> {
        self.ror()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FUNDER: &str = r#"{
        "id": "https://openalex.org/F4320332161",
        "display_name": "National Institutes of Health",
        "alternate_titles": ["NIH"],
        "country_code": "US",
        "ids": {
            "openalex": "https://openalex.org/F4320332161",
            "ror": "https://ror.org/01cwqze88",
            "crossref": "100000002"
        },
        "grants_count": 300000,
        "works_count": 2000000
    }"#;

    #[test]
    fn parse_funder() {
        let funder: Funder = serde_json::from_str(SAMPLE_FUNDER).unwrap();
        assert_eq!(funder.short_id(), Some("F4320332161"));
        assert_eq!(funder.grants_count, Some(300000));
        assert_eq!(funder.crossref(), Some("100000002"));
    }

    #[test]
    fn canonical_id_is_ror() {
        let funder: Funder = serde_json::from_str(SAMPLE_FUNDER).unwrap();
        assert_eq!(funder.canonical_external_id(), Some("https://ror.org/01cwqze88"));
    }

    #[test]
    fn minimal_funder() {
        let funder: Funder = serde_json::from_str(r#"{"id": "https://openalex.org/F1"}"#).unwrap();
        assert!(funder.ror().is_none());
        assert!(funder.alternate_titles.is_empty());
    }
}
