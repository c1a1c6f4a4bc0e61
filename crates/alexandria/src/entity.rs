//! Entity kinds served by the API and the record trait tying them to types

use std::fmt;

use serde::de::DeserializeOwned;

/// OpenAlex entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Academic works (papers, articles, books, datasets, ...)
    Works,
    /// Researchers and authors
    Authors,
    /// Journals, repositories, conferences
    Sources,
    /// Universities, research organizations
    Institutions,
    /// Legacy hierarchical concept tagging
    Concepts,
    /// Academic publishers
    Publishers,
    /// Funding organizations
    Funders,
    /// Research topics (hierarchical classification)
    Topics,
}

impl EntityKind {
    /// Parse entity from string name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "works" => Some(Self::Works),
            "authors" => Some(Self::Authors),
            "sources" => Some(Self::Sources),
            "institutions" => Some(Self::Institutions),
            "concepts" => Some(Self::Concepts),
            "publishers" => Some(Self::Publishers),
            "funders" => Some(Self::Funders),
            "topics" => Some(Self::Topics),
            _ => None,
        }
    }

    /// URL path segment of the entity endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Self::Works => "works",
            Self::Authors => "authors",
            Self::Sources => "sources",
            Self::Institutions => "institutions",
            Self::Concepts => "concepts",
            Self::Publishers => "publishers",
            Self::Funders => "funders",
            Self::Topics => "topics",
        }
    }

    /// Leading letter of this kind's OpenAlex IDs (e.g. `A` in `A5023888391`)
    pub fn id_prefix(&self) -> char {
        match self {
            Self::Works => 'W',
            Self::Authors => 'A',
            Self::Sources => 'S',
            Self::Institutions => 'I',
            Self::Concepts => 'C',
            Self::Publishers => 'P',
            Self::Funders => 'F',
            Self::Topics => 'T',
        }
    }

    /// Entity kind owning OpenAlex IDs that start with `prefix`
    pub fn from_id_prefix(prefix: char) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.id_prefix() == prefix.to_ascii_uppercase())
    }

    /// List all available entities
    pub fn all() -> &'static [EntityKind] {
        &[
            Self::Works,
            Self::Authors,
            Self::Sources,
            Self::Institutions,
            Self::Concepts,
            Self::Publishers,
            Self::Funders,
            Self::Topics,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A typed record returned by one entity endpoint.
///
/// Implemented by every struct in [`crate::model`]; the associated `KIND`
/// decides which endpoint a [`crate::Query`] targets.
pub trait Record: DeserializeOwned {
    const KIND: EntityKind;

    /// Full OpenAlex ID URL, absent when excluded by `select`
    fn id(&self) -> Option<&str>;

    /// Short OpenAlex ID (e.g. "W2741809807")
    fn short_id(&self) -> Option<&str> {
        self.id().map(crate::model::short_id)
    }

    /// Identifier in the external system treated as authoritative for this kind
    fn canonical_external_id(&self) -> Option<&str> {
        None
    }
}
