//! PubMed E-utilities client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - NCBI politeness delay (3 req/s without key, 10 req/s with key)
//! - Response caching with 5-minute TTL
//!
//! Every request is attempted exactly once; there is no retry layer.

use moka::future::Cache;
use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::medline::parse_medline;
use crate::models::ArticleRecord;

/// Client for the NCBI E-utilities (esearch/efetch).
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client.
    client: Client,

    /// Response body cache.
    cache: Cache<String, String>,

    /// Contact email sent with every request, per NCBI policy.
    email: String,

    /// API key (optional).
    api_key: Option<String>,

    /// E-utilities base URL.
    eutils_base_url: String,

    /// Politeness delay before each request.
    rate_limit_delay: std::time::Duration,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            email: config.email,
            api_key: config.api_key,
            eutils_base_url: config.eutils_base_url,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search PubMed for record identifiers matching a query.
    ///
    /// Returns at most `retmax` PMIDs; zero matches yield an empty vector,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a malformed response.
    pub async fn search(&self, query: &str, retmax: u32) -> ClientResult<Vec<String>> {
        let url = format!("{}/esearch.fcgi", self.eutils_base_url);

        let mut params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("term".to_string(), query.to_string()),
            ("retmax".to_string(), retmax.to_string()),
            ("retmode".to_string(), "json".to_string()),
        ];
        self.push_identity(&mut params);

        let body = self.get(&url, &params).await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        let ids = value["esearchresult"]["idlist"]
            .as_array()
            .map(|list| {
                list.iter().filter_map(|v| v.as_str()).map(String::from).collect()
            })
            .unwrap_or_default();

        Ok(ids)
    }

    /// Fetch full MEDLINE records for the given PMIDs.
    ///
    /// An empty ID list short-circuits to an empty vector without issuing
    /// a request.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure.
    pub async fn fetch_articles(&self, ids: &[String]) -> ClientResult<Vec<ArticleRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/efetch.fcgi", self.eutils_base_url);

        let mut params = vec![
            ("db".to_string(), "pubmed".to_string()),
            ("id".to_string(), ids.join(",")),
            ("rettype".to_string(), "medline".to_string()),
            ("retmode".to_string(), "text".to_string()),
        ];
        self.push_identity(&mut params);

        let body = self.get(&url, &params).await?;
        Ok(parse_medline(&body))
    }

    /// Search and fetch in one step, returning full records.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure in either step.
    pub async fn search_and_fetch(
        &self,
        query: &str,
        retmax: u32,
    ) -> ClientResult<Vec<ArticleRecord>> {
        let ids = self.search(query, retmax).await?;
        if ids.is_empty() {
            tracing::info!(query, "search returned no identifiers");
            return Ok(Vec::new());
        }

        tracing::debug!(query, count = ids.len(), "fetching MEDLINE records");
        self.fetch_articles(&ids).await
    }

    /// Append the identity parameters NCBI expects on every call.
    fn push_identity(&self, params: &mut Vec<(String, String)>) {
        params.push(("email".to_string(), self.email.clone()));
        if let Some(ref key) = self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
    }

    /// Make a GET request, returning the response body as text.
    async fn get(&self, url: &str, params: &[(String, String)]) -> ClientResult<String> {
        // Check cache
        let cache_key = self.cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        // Politeness delay
        tokio::time::sleep(self.rate_limit_delay).await;

        let response = self.client.get(url).query(params).send().await?;
        let response = Self::handle_response(response)?;
        let body = response.text().await?;

        self.cache.insert(cache_key, body.clone()).await;

        Ok(body)
    }

    /// Map non-success status codes onto client errors.
    fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => Err(ClientError::rate_limited("too many requests")),
            400 => Err(ClientError::bad_request(status.to_string())),
            500..=599 => Err(ClientError::server(status.as_u16(), status.to_string())),
            _ => Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                message: status.to_string(),
            }),
        }
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient").field("has_api_key", &self.has_api_key()).finish()
    }
}
