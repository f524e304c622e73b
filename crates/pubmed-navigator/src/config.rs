//! Configuration for the PubMed navigator.

use std::time::Duration;

/// NCBI E-utilities configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI E-utilities.
    pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Request timeout (efetch for 100 MEDLINE records can be slow).
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay between requests without an API key (334ms ~= 3 req/s, NCBI policy).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(334);

    /// Delay between requests with an API key (100ms = 10 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(100);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Upper bound on records per fetch, enforced on search criteria.
    pub const MAX_RESULTS: u32 = 100;
}

/// Navigator configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact email, required by NCBI for E-utilities access.
    pub email: String,

    /// NCBI API key (optional, raises the request rate).
    pub api_key: Option<String>,

    /// Base URL for E-utilities (overridable for mock servers).
    pub eutils_base_url: String,

    /// Base URL of the entity tagging service.
    pub tagger_url: Option<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Politeness delay between E-utilities requests.
    pub rate_limit_delay: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration.
    ///
    /// The politeness delay is adjusted automatically: 3 req/s without an
    /// API key, 10 req/s with one, per NCBI's published limits.
    #[must_use]
    pub fn new(email: impl Into<String>, api_key: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            email: email.into(),
            api_key,
            eutils_base_url: api::EUTILS_BASE_URL.to_string(),
            tagger_url: None,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            email: "test@example.org".to_string(),
            api_key: None,
            eutils_base_url: base_url.to_string(),
            tagger_url: None,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            cache_ttl: Duration::from_secs(0),          // No caching in tests
            cache_max_size: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PUBMED_EMAIL` (required), `NCBI_API_KEY` and `TAGGER_URL`
    /// (optional).
    ///
    /// # Errors
    ///
    /// Returns error if `PUBMED_EMAIL` is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let email = std::env::var("PUBMED_EMAIL")
            .map_err(|_| anyhow::anyhow!("PUBMED_EMAIL must be set for E-utilities access"))?;
        let api_key = std::env::var("NCBI_API_KEY").ok();
        let tagger_url = std::env::var("TAGGER_URL").ok();
        Ok(Self { tagger_url, ..Self::new(email, api_key) })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
