//! Data models for the PubMed navigator.
//!
//! Bibliographic fields are optional with explicit sentinel defaults at the
//! accessor boundary; missing data never fails a record.

mod article;
mod inputs;

pub use article::ArticleRecord;
pub use inputs::{AllowedRelationships, ArticleType, SearchCriteria, parse_entity_types};
