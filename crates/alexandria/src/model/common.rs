//! Structures shared by several entity records

use serde::{Deserialize, Deserializer};

/// Extract short ID from full OpenAlex URL
/// (e.g. "https://openalex.org/W123" -> "W123")
pub fn short_id(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(url)
}

/// Short IDs of a list of OpenAlex URLs
pub(crate) fn short_ids<'a>(urls: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    urls.into_iter().map(|u| short_id(u).to_string()).collect()
}

/// Citation metrics attached to authors, sources, institutions, ...
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SummaryStats {
    #[serde(default)]
    pub h_index: Option<u32>,
    #[serde(default)]
    pub i10_index: Option<u32>,
    #[serde(rename = "2yr_mean_citedness", default)]
    pub two_yr_mean_citedness: Option<f64>,
}

/// Works and citations for one year
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CountsByYear {
    pub year: i32,
    #[serde(default)]
    pub works_count: Option<u64>,
    #[serde(default)]
    pub cited_by_count: Option<u64>,
}

/// Compact institution reference embedded in other records
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DehydratedInstitution {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub ror: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(rename = "type", default)]
    pub institution_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lineage: Vec<String>,
}

/// Compact concept reference, optionally scored
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DehydratedConcept {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One level of the domain > field > subfield > topic hierarchy
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HierarchyItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Topic assigned to a work or aggregated on an author/source
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TopicRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub subfield: Option<HierarchyItem>,
    #[serde(default)]
    pub field: Option<HierarchyItem>,
    #[serde(default)]
    pub domain: Option<HierarchyItem>,
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric IDs (e.g. MAG) arrive as strings on some entities and as
/// numbers on others.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    }))
}

/// Accept a reference given either as an ID string or as an object with an `id`.
///
/// The API has served some parent links (e.g. `parent_publisher`) in both
/// shapes.
pub(crate) fn id_or_object<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reference {
        Id(String),
        Object {
            #[serde(default)]
            id: Option<String>,
        },
    }

    Ok(match Option::<Reference>::deserialize(deserializer)? {
        Some(Reference::Id(id)) => Some(id),
        Some(Reference::Object { id }) => id,
        None => None,
    })
}
