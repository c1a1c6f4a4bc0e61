//! Alexandria - typed query client for the OpenAlex API
//!
//! This crate builds OpenAlex list, group_by and lookup queries by method
//! chaining, sends them over a blocking HTTP transport and decodes the
//! responses into typed records.
//!
//! # Example
//!
//! ```no_run
//! use alexandria::{Config, Direction, OpenAlex};
//!
//! let client = OpenAlex::new(Config::default())?;
//!
//! let page = client
//!     .works()
//!     .filter("institutions.country_code", "nl")
//!     .filter_gte("publication_year", 2020)
//!     .sort("cited_by_count", Direction::Desc)
//!     .per_page(10)
//!     .get()?;
//! for work in &page.results {
//!     println!("{:?}", work.display_name);
//! }
//!
//! for author in client.authors().filter("has_orcid", true).paginate().n_max(500).records() {
//!     let author = author?;
//!     println!("{:?} {:?}", author.display_name, author.orcid());
//! }
//! # Ok::<(), alexandria::Error>(())
//! ```

pub mod abstract_decode;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod executor;
pub mod id;
pub mod model;
pub mod paginate;
pub mod query;
pub mod request;
pub mod response;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use client::OpenAlex;
pub use config::Config;
pub use entity::{EntityKind, Record};
pub use error::{Error, Result};
pub use executor::Executor;
pub use id::{EntityId, IdNamespace};
pub use paginate::{PageMethod, Paginator, Records};
pub use query::{Direction, FilterSet, FilterValue, GroupOrder, Query, SortKey};
pub use request::Request;
pub use response::{GroupResult, Meta, Page};
