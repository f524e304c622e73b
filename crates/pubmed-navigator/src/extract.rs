//! Entity extraction and co-occurrence relationship building.
//!
//! For each abstract the external tagger yields raw spans; spans outside
//! the caller's allowed-type set are dropped, kept spans are lowercased,
//! and intra-document duplicates are retained on purpose: the pairwise
//! enumeration counts every co-occurrence.

use std::collections::{BTreeSet, HashMap};

use crate::error::{PipelineError, PipelineResult};
use crate::models::{AllowedRelationships, ArticleRecord};
use crate::tagger::{EntityTagger, TaggedSpan};

/// One entity mention within a single abstract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Normalized (lowercased) mention text.
    pub text: String,

    /// Entity type as reported by the tagger.
    pub entity_type: String,
}

/// Corpus-wide record for one unique entity text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    /// Every document title the entity appeared in.
    pub titles: BTreeSet<String>,

    /// Most recently observed type for this text (last write wins).
    pub entity_type: String,
}

/// Corpus-wide entity mapping keyed by normalized mention text.
pub type EntityIndex = HashMap<String, EntityRecord>;

/// One qualifying co-occurrence between two mentions in the same abstract.
///
/// Edges are not deduplicated across documents; multiplicity reflects the
/// number of co-occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEdge {
    /// Source entity text.
    pub source: String,

    /// Target entity text.
    pub target: String,

    /// Label of the form `{type1}_to_{type2}` in encounter order.
    pub label: String,
}

/// Output of one extraction run over the fetched corpus.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Flat edge list across all abstracts.
    pub edges: Vec<RelationshipEdge>,

    /// Corpus-wide entity mapping.
    pub entities: EntityIndex,
}

/// Filter raw spans to the allowed types and normalize their text.
///
/// Duplicates within a document are kept; they affect pair counting.
#[must_use]
pub fn filter_mentions(spans: &[TaggedSpan], allowed_types: &[String]) -> Vec<Mention> {
    spans
        .iter()
        .filter(|span| allowed_types.iter().any(|t| t == &span.label))
        .map(|span| Mention { text: span.text.to_lowercase(), entity_type: span.label.clone() })
        .collect()
}

/// Fold one document's mentions into the corpus-wide entity index.
///
/// Title sets are unioned; the stored type is overwritten on every
/// encounter, so conflicting types across documents resolve to the last
/// one seen.
pub fn accumulate_entities(index: &mut EntityIndex, mentions: &[Mention], title: &str) {
    for mention in mentions {
        let record = index.entry(mention.text.clone()).or_default();
        record.entity_type = mention.entity_type.clone();
        record.titles.insert(title.to_string());
    }
}

/// Enumerate all C(n,2) positional pairs of a document's mentions and keep
/// those whose (type, type) combination the allow-list admits in either
/// order. Labels use encounter order, not a canonical sort.
#[must_use]
pub fn pair_mentions(mentions: &[Mention], allowed: &AllowedRelationships) -> Vec<RelationshipEdge> {
    let mut edges = Vec::new();

    for i in 0..mentions.len() {
        for j in (i + 1)..mentions.len() {
            let (first, second) = (&mentions[i], &mentions[j]);
            if allowed.allows(&first.entity_type, &second.entity_type) {
                edges.push(RelationshipEdge {
                    source: first.text.clone(),
                    target: second.text.clone(),
                    label: format!("{}_to_{}", first.entity_type, second.entity_type),
                });
            }
        }
    }

    edges
}

/// Run extraction over the fetched corpus.
///
/// Records missing a title or abstract are skipped. A tagger failure is
/// fatal for the whole run.
///
/// # Errors
///
/// Returns a tagger error if the collaborator fails on any abstract.
pub async fn process_articles(
    articles: &[ArticleRecord],
    tagger: &dyn EntityTagger,
    allowed_types: &[String],
    allowed_relationships: &AllowedRelationships,
) -> PipelineResult<ExtractionResult> {
    let mut result = ExtractionResult::default();

    for article in articles.iter().filter(|a| a.has_text()) {
        let title = article.title_or_default();
        let spans = tagger
            .tag(article.abstract_or_default())
            .await
            .map_err(|e| PipelineError::tagger(e.to_string()))?;

        let mentions = filter_mentions(&spans, allowed_types);
        tracing::debug!(title, mentions = mentions.len(), "tagged abstract");

        accumulate_entities(&mut result.entities, &mentions, title);
        result.edges.extend(pair_mentions(&mentions, allowed_relationships));
    }

    tracing::info!(
        entities = result.entities.len(),
        edges = result.edges.len(),
        "extraction complete"
    );

    Ok(result)
}
