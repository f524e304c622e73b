//! Entity tagging collaborator.
//!
//! The NER model itself is external; this module defines the seam the
//! pipeline consumes ("given text, return tagged spans") and an HTTP
//! implementation for a tagging service that wraps the pretrained model.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// A tagged span returned by the NER collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedSpan {
    /// Span text as it appears in the source.
    pub text: String,

    /// Entity label (e.g. "CHEMICAL", "DISEASE").
    pub label: String,
}

/// Seam for the external NER model.
#[async_trait::async_trait]
pub trait EntityTagger: Send + Sync {
    /// Tag entity mentions in the given text.
    ///
    /// # Errors
    ///
    /// Returns error if the collaborator fails; the caller treats this as
    /// fatal for the extraction run.
    async fn tag(&self, text: &str) -> ClientResult<Vec<TaggedSpan>>;
}

/// HTTP-backed tagger for a service exposing `POST {base}/tag`.
#[derive(Debug, Clone)]
pub struct HttpTagger {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTagger {
    /// Create a tagger client for the given service base URL.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait::async_trait]
impl EntityTagger for HttpTagger {
    async fn tag(&self, text: &str) -> ClientResult<Vec<TaggedSpan>> {
        let url = format!("{}/tag", self.base_url);
        let body = serde_json::json!({ "text": text });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::server(status.as_u16(), status.to_string()));
        }

        let spans: Vec<TaggedSpan> = response.json().await?;
        Ok(spans)
    }
}
