//! PubMed Research Navigator - Entry Point
//!
//! Drives one session end to end: fetch articles, write the spreadsheet,
//! then (when a tagger service is configured) extract entities and write
//! the interactive graph document.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_navigator::models::{
    AllowedRelationships, ArticleType, SearchCriteria, parse_entity_types,
};
use pubmed_navigator::tagger::HttpTagger;
use pubmed_navigator::{Config, PubMedClient, Session};

#[derive(Parser, Debug)]
#[command(name = "pubmed-navigator")]
#[command(about = "Search PubMed, export abstracts, and graph co-occurring biomedical entities")]
#[command(version)]
struct Cli {
    /// Search term
    search_term: String,

    /// Contact email for NCBI E-utilities access
    #[arg(long, env = "PUBMED_EMAIL")]
    email: String,

    /// NCBI API key (optional, enables higher request rates)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Optional MeSH term to AND into the query
    #[arg(long)]
    mesh_term: Option<String>,

    /// Article-type filter
    #[arg(long, value_enum, default_value = "clinical-trial")]
    article_type: ArticleType,

    /// Number of articles to fetch (1-100)
    #[arg(long, default_value = "10")]
    max_results: u32,

    /// Comma-separated entity types to keep
    #[arg(long, default_value = "CHEMICAL, DISEASE")]
    entity_types: String,

    /// Allowed relationships, e.g. "CHEMICAL-DISEASE, CHEMICAL-CHEMICAL"
    #[arg(long, default_value = "CHEMICAL-DISEASE")]
    relationships: String,

    /// Base URL of the entity tagging service; skip extraction if unset
    #[arg(long, env = "TAGGER_URL")]
    tagger_url: Option<String>,

    /// Output path for the spreadsheet
    #[arg(long, default_value = "pubmed_articles.csv")]
    out_csv: PathBuf,

    /// Output path for the graph document
    #[arg(long, default_value = "entity_relationship_graph.html")]
    out_html: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting PubMed navigator");

    let mut config = Config::new(cli.email, cli.api_key);
    config.tagger_url = cli.tagger_url.clone();

    let client = PubMedClient::new(config)?;
    let mut session = Session::new(client);

    let criteria = SearchCriteria {
        search_term: cli.search_term,
        mesh_term: cli.mesh_term,
        article_type: cli.article_type,
        max_results: cli.max_results,
    };

    let count = session.fetch(&criteria).await?;
    if let Some(message) = session.last_fetch_message() {
        eprintln!("{message}");
    }
    tracing::info!(count, "articles fetched");

    let buffer = session.export()?;
    std::fs::write(&cli.out_csv, buffer)?;
    println!("Wrote {} articles to {}", count, cli.out_csv.display());

    let Some(tagger_url) = cli.tagger_url else {
        tracing::info!("no tagger configured, skipping extraction");
        return Ok(());
    };

    let tagger = HttpTagger::new(tagger_url)?;
    let entity_types = parse_entity_types(&cli.entity_types);
    let allowed = AllowedRelationships::parse(&cli.relationships);

    let result = session.extract_and_render(&tagger, &entity_types, &allowed).await?;
    println!(
        "Processed {} relationships across {} entities",
        result.edges.len(),
        result.entities.len()
    );

    let html = session.graph_html().expect("graph rendered by extract_and_render");
    std::fs::write(&cli.out_html, html)?;
    println!("Wrote graph to {}", cli.out_html.display());

    Ok(())
}
