//! PubMed Research Navigator
//!
//! Searches PubMed for abstracts matching a term and article-type filter,
//! exports the results to a spreadsheet buffer, runs an external NER
//! collaborator over the abstracts, and renders a force-directed graph of
//! co-occurring biomedical entities as a self-contained HTML page.
//!
//! # Pipeline
//!
//! - **Search**: esearch/efetch against NCBI E-utilities, MEDLINE parsing
//! - **Export**: five-column CSV buffer for download
//! - **Extract**: entity tagging, type filtering, co-occurrence pairing
//! - **Render**: vis-network HTML with fixed force-atlas physics
//!
//! # Example
//!
//! ```no_run
//! use pubmed_navigator::{client::PubMedClient, config::Config, session::Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PubMedClient::new(config)?;
//!     let _session = Session::new(client);
//!
//!     // Drive fetch / export / extract from here
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod graph;
pub mod medline;
pub mod models;
pub mod session;
pub mod tagger;

pub use client::PubMedClient;
pub use config::Config;
pub use error::{ClientError, PipelineError};
pub use session::Session;
