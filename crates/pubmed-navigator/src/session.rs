//! Session-scoped pipeline state.
//!
//! The session is the explicit context object standing in for a database:
//! it owns the fetched records, the export buffer, and the rendered graph
//! for the duration of one user session, and is overwritten in place on
//! each re-run. Transitions are user-triggered and idempotent; re-running
//! a fetch replaces the record set and resets the downstream artifacts.

use crate::client::PubMedClient;
use crate::error::{PipelineError, PipelineResult};
use crate::export::write_csv;
use crate::extract::{ExtractionResult, process_articles};
use crate::graph::EntityGraph;
use crate::models::{AllowedRelationships, ArticleRecord, SearchCriteria};
use crate::tagger::EntityTagger;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing fetched yet.
    Idle,
    /// Records available.
    Fetched,
    /// Spreadsheet buffer available.
    Exported,
    /// Graph artifact available.
    Extracted,
}

/// One user session of the navigator.
pub struct Session {
    client: PubMedClient,
    records: Vec<ArticleRecord>,
    export_buffer: Option<Vec<u8>>,
    graph_html: Option<String>,
    last_fetch_message: Option<String>,
    fetched: bool,
}

impl Session {
    /// Create an idle session around a client.
    #[must_use]
    pub fn new(client: PubMedClient) -> Self {
        Self {
            client,
            records: Vec::new(),
            export_buffer: None,
            graph_html: None,
            last_fetch_message: None,
            fetched: false,
        }
    }

    /// Current state, derived from which artifacts exist.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.graph_html.is_some() {
            SessionState::Extracted
        } else if self.export_buffer.is_some() {
            SessionState::Exported
        } else if self.fetched {
            SessionState::Fetched
        } else {
            SessionState::Idle
        }
    }

    /// The fetched records.
    #[must_use]
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// User-visible message from the last fetch, if it failed.
    #[must_use]
    pub fn last_fetch_message(&self) -> Option<&str> {
        self.last_fetch_message.as_deref()
    }

    /// Fetch records matching the criteria, replacing any previous set.
    ///
    /// A client failure is recovered here: it is logged, surfaced via
    /// [`Self::last_fetch_message`], and treated as zero results so the
    /// rest of the pipeline proceeds with no data. Returns the number of
    /// records fetched.
    ///
    /// # Errors
    ///
    /// Returns a validation error for invalid criteria; client failures
    /// do not error.
    pub async fn fetch(&mut self, criteria: &SearchCriteria) -> PipelineResult<usize> {
        criteria.validate()?;

        let query = criteria.to_query();
        tracing::info!(query, max_results = criteria.max_results, "fetching articles");

        let records = match self.client.search_and_fetch(&query, criteria.max_results).await {
            Ok(records) => {
                self.last_fetch_message = None;
                records
            }
            Err(e) => {
                let message = format!("Error fetching articles: {e}");
                tracing::warn!(error = %e, "fetch failed, continuing with no data");
                self.last_fetch_message = Some(message);
                Vec::new()
            }
        };

        self.records = records;
        self.fetched = true;
        // Downstream artifacts belong to the previous record set
        self.export_buffer = None;
        self.graph_html = None;

        Ok(self.records.len())
    }

    /// Serialize the fetched records into the downloadable spreadsheet
    /// buffer and return it.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error before any fetch, or a CSV error.
    pub fn export(&mut self) -> PipelineResult<&[u8]> {
        if !self.fetched {
            return Err(PipelineError::invalid_state("export requires a fetch first"));
        }

        let buffer = write_csv(&self.records)?;
        tracing::info!(rows = self.records.len(), bytes = buffer.len(), "export ready");
        self.export_buffer = Some(buffer);
        Ok(self.export_buffer.as_deref().expect("buffer was just stored"))
    }

    /// The export buffer, if one has been produced.
    #[must_use]
    pub fn export_buffer(&self) -> Option<&[u8]> {
        self.export_buffer.as_deref()
    }

    /// Run extraction over the fetched records and render the graph
    /// artifact, replacing any previous one.
    ///
    /// Entity and edge collections are rebuilt from scratch on every run.
    /// A tagger failure is fatal and propagates.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error before any fetch, a tagger error,
    /// or a serialization error from rendering.
    pub async fn extract_and_render(
        &mut self,
        tagger: &dyn EntityTagger,
        entity_types: &[String],
        allowed_relationships: &AllowedRelationships,
    ) -> PipelineResult<ExtractionResult> {
        if !self.fetched {
            return Err(PipelineError::invalid_state("extraction requires a fetch first"));
        }

        let result =
            process_articles(&self.records, tagger, entity_types, allowed_relationships).await?;

        let graph = EntityGraph::build(&result.entities, &result.edges);
        self.graph_html = Some(graph.to_html()?);

        Ok(result)
    }

    /// The rendered graph document, if one has been produced.
    #[must_use]
    pub fn graph_html(&self) -> Option<&str> {
        self.graph_html.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("records", &self.records.len())
            .finish()
    }
}
