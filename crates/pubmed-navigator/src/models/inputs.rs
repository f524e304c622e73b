//! User-supplied search and extraction inputs.

use serde::{Deserialize, Serialize};

use crate::config::api;
use crate::error::{PipelineError, PipelineResult};

/// PubMed article-type filter categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleType {
    /// Clinical trials.
    ClinicalTrial,
    /// Meta-analyses.
    MetaAnalysis,
    /// Randomized controlled trials.
    RandomizedControlledTrial,
    /// Review articles.
    Review,
}

impl ArticleType {
    /// The PubMed publication-type filter clause for this category.
    #[must_use]
    pub const fn filter_clause(self) -> &'static str {
        match self {
            Self::ClinicalTrial => "Clinical Trial[pt]",
            Self::MetaAnalysis => "Meta-Analysis[pt]",
            Self::RandomizedControlledTrial => "Randomized Controlled Trial[pt]",
            Self::Review => "Review[pt]",
        }
    }
}

/// Criteria for one PubMed search, immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text search term.
    pub search_term: String,

    /// Optional MeSH controlled-vocabulary term.
    #[serde(default)]
    pub mesh_term: Option<String>,

    /// Article-type filter.
    pub article_type: ArticleType,

    /// Maximum records to fetch (1..=100).
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    10
}

impl SearchCriteria {
    /// Build the PubMed query string.
    ///
    /// Produces `({term}) AND {filter}`, plus ` AND {mesh}[MeSH Terms]`
    /// when a MeSH term is supplied. Term content is not validated here;
    /// empty terms are rejected by [`Self::validate`] before fetch.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query =
            format!("({}) AND {}", self.search_term, self.article_type.filter_clause());
        if let Some(mesh) = self.mesh_term.as_deref().filter(|m| !m.is_empty()) {
            query.push_str(&format!(" AND {mesh}[MeSH Terms]"));
        }
        query
    }

    /// Validate the criteria before submission.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty search term or an
    /// out-of-range result cap.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.search_term.trim().is_empty() {
            return Err(PipelineError::validation("search_term", "cannot be empty"));
        }
        if self.max_results < 1 || self.max_results > api::MAX_RESULTS {
            return Err(PipelineError::validation(
                "max_results",
                format!("must be between 1 and {}", api::MAX_RESULTS),
            ));
        }
        Ok(())
    }
}

/// Order-insensitive allow-list of entity-type pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRelationships {
    pairs: Vec<(String, String)>,
}

impl AllowedRelationships {
    /// Parse a `TYPE1-TYPE2[, TYPE3-TYPE4...]` allow-list.
    ///
    /// Entries without a `-` separator are silently skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let pairs = input
            .split(',')
            .filter_map(|entry| {
                let (left, right) = entry.split_once('-')?;
                Some((left.trim().to_string(), right.trim().to_string()))
            })
            .collect();
        Self { pairs }
    }

    /// True if the (type, type) combination is allowed in either order.
    #[must_use]
    pub fn allows(&self, type1: &str, type2: &str) -> bool {
        self.pairs
            .iter()
            .any(|(a, b)| (a == type1 && b == type2) || (a == type2 && b == type1))
    }

    /// Number of parsed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if no pairs were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Parse a comma-separated entity-type allow-list.
#[must_use]
pub fn parse_entity_types(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
