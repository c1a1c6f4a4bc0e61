//! Typed records for OpenAlex entities
//!
//! Every scalar is an `Option` and every list defaults to empty when missing
//! or `null`, so records trimmed by `select` still deserialize.

pub mod author;
pub mod autocomplete;
pub mod common;
pub mod concept;
pub mod funder;
pub mod institution;
pub mod publisher;
pub mod source;
pub mod topic;
pub mod work;

pub use author::Author;
pub use autocomplete::AutocompleteResult;
pub use common::{
    CountsByYear, DehydratedConcept, DehydratedInstitution, HierarchyItem, SummaryStats, TopicRef,
    short_id,
};
pub use concept::Concept;
pub use funder::Funder;
pub use institution::Institution;
pub use publisher::Publisher;
pub use source::Source;
pub use topic::Topic;
pub use work::Work;
