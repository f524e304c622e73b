//! End-to-end session tests with a mocked E-utilities server and a
//! keyword-based fixture tagger.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_navigator::client::PubMedClient;
use pubmed_navigator::config::Config;
use pubmed_navigator::error::{ClientResult, PipelineError};
use pubmed_navigator::export::CSV_HEADERS;
use pubmed_navigator::models::{AllowedRelationships, ArticleType, SearchCriteria};
use pubmed_navigator::session::{Session, SessionState};
use pubmed_navigator::tagger::{EntityTagger, TaggedSpan};

/// Tagger that reports a span for each vocabulary word found in the text.
struct KeywordTagger {
    vocab: Vec<(&'static str, &'static str)>,
}

impl KeywordTagger {
    fn biomedical() -> Self {
        Self {
            vocab: vec![
                ("aspirin", "CHEMICAL"),
                ("ibuprofen", "CHEMICAL"),
                ("stroke", "DISEASE"),
                ("migraine", "DISEASE"),
            ],
        }
    }
}

#[async_trait::async_trait]
impl EntityTagger for KeywordTagger {
    async fn tag(&self, text: &str) -> ClientResult<Vec<TaggedSpan>> {
        let lower = text.to_lowercase();
        Ok(self
            .vocab
            .iter()
            .filter(|(word, _)| lower.contains(word))
            .map(|(word, label)| TaggedSpan {
                text: (*word).to_string(),
                label: (*label).to_string(),
            })
            .collect())
    }
}

fn setup_session(mock_server: &MockServer) -> Session {
    let config = Config::for_testing(&mock_server.uri());
    Session::new(PubMedClient::new(config).unwrap())
}

fn criteria(term: &str, max_results: u32) -> SearchCriteria {
    SearchCriteria {
        search_term: term.to_string(),
        mesh_term: None,
        article_type: ArticleType::ClinicalTrial,
        max_results,
    }
}

async fn mount_corpus(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "esearchresult": { "idlist": ["11111111", "22222222"] }
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "\
PMID- 11111111
TI  - Aspirin and stroke prevention.
AU  - Smith J
AB  - Aspirin lowered the incidence of stroke in the treatment arm.
DP  - 2021 Mar
TA  - Lancet

PMID- 22222222
TI  - Aspirin versus ibuprofen.
AU  - Doe A
AB  - Aspirin and ibuprofen were compared for migraine relief.
DP  - 2020 Jan
TA  - BMJ
",
        ))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_full_pipeline_fetch_export_extract() {
    let mock_server = MockServer::start().await;
    mount_corpus(&mock_server).await;

    let mut session = setup_session(&mock_server);
    assert_eq!(session.state(), SessionState::Idle);

    // Fetch
    let count = session.fetch(&criteria("aspirin", 5)).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(session.state(), SessionState::Fetched);
    assert!(session.last_fetch_message().is_none());

    // Export
    let buffer = session.export().unwrap().to_vec();
    assert_eq!(session.state(), SessionState::Exported);

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), CSV_HEADERS.to_vec());
    assert_eq!(reader.records().count(), 2);

    // Extract and render
    let tagger = KeywordTagger::biomedical();
    let types = vec!["CHEMICAL".to_string(), "DISEASE".to_string()];
    let allowed = AllowedRelationships::parse("CHEMICAL-DISEASE");

    let result = session.extract_and_render(&tagger, &types, &allowed).await.unwrap();
    assert_eq!(session.state(), SessionState::Extracted);

    // Doc 1: aspirin+stroke -> 1 edge. Doc 2: aspirin+ibuprofen+migraine ->
    // aspirin-migraine and ibuprofen-migraine qualify, not the chemical pair.
    assert_eq!(result.edges.len(), 3);
    assert_eq!(result.entities.len(), 4);

    // aspirin appeared in both documents; its title set is the union
    let aspirin = &result.entities["aspirin"];
    assert_eq!(aspirin.titles.len(), 2);

    let html = session.graph_html().unwrap();
    assert!(html.contains("aspirin"));
    assert!(html.contains("CHEMICAL_to_DISEASE"));
    assert!(html.contains("forceAtlas2Based"));
}

#[tokio::test]
async fn test_zero_identifiers_flow_through_gracefully() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "esearchresult": { "idlist": [] }
        })))
        .mount(&mock_server)
        .await;

    let mut session = setup_session(&mock_server);

    let count = session.fetch(&criteria("aspirin", 5)).await.unwrap();
    assert_eq!(count, 0);

    // Export has zero rows
    let buffer = session.export().unwrap().to_vec();
    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    assert_eq!(reader.records().count(), 0);

    // Extraction produces an empty graph, not an error
    let tagger = KeywordTagger::biomedical();
    let result = session
        .extract_and_render(
            &tagger,
            &["CHEMICAL".to_string()],
            &AllowedRelationships::parse("CHEMICAL-DISEASE"),
        )
        .await
        .unwrap();

    assert!(result.entities.is_empty());
    assert!(result.edges.is_empty());
    assert!(session.graph_html().unwrap().contains("new vis.DataSet([])"));
}

#[tokio::test]
async fn test_fetch_failure_recovers_to_empty_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut session = setup_session(&mock_server);
    let count = session.fetch(&criteria("aspirin", 5)).await.unwrap();

    assert_eq!(count, 0);
    assert!(session.records().is_empty());
    assert!(session.last_fetch_message().unwrap().contains("Error fetching articles"));
    assert_eq!(session.state(), SessionState::Fetched);
}

#[tokio::test]
async fn test_fetch_rejects_invalid_criteria() {
    let mock_server = MockServer::start().await;
    let mut session = setup_session(&mock_server);

    let err = session.fetch(&criteria("", 5)).await.unwrap_err();
    assert!(matches!(err, PipelineError::Validation { .. }));

    let err = session.fetch(&criteria("aspirin", 0)).await.unwrap_err();
    assert!(matches!(err, PipelineError::Validation { .. }));
}

#[tokio::test]
async fn test_steps_require_fetch_first() {
    let mock_server = MockServer::start().await;
    let mut session = setup_session(&mock_server);

    assert!(matches!(session.export(), Err(PipelineError::InvalidState(_))));

    let tagger = KeywordTagger::biomedical();
    let err = session
        .extract_and_render(&tagger, &[], &AllowedRelationships::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidState(_)));
}

#[tokio::test]
async fn test_refetch_resets_downstream_artifacts() {
    let mock_server = MockServer::start().await;
    mount_corpus(&mock_server).await;

    let mut session = setup_session(&mock_server);
    session.fetch(&criteria("aspirin", 5)).await.unwrap();
    session.export().unwrap();
    assert_eq!(session.state(), SessionState::Exported);

    // Re-running the fetch replaces the record set and discards the export
    session.fetch(&criteria("ibuprofen", 5)).await.unwrap();
    assert_eq!(session.state(), SessionState::Fetched);
    assert!(session.export_buffer().is_none());
    assert!(session.graph_html().is_none());
}
