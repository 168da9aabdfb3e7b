use serde::Deserialize;
use std::time::Duration;
use toolscout_core::{Error, Result, ScrapeBackend, SearchBackend, SearchHit};

use crate::env;

// Every search is steered toward pricing pages; that is where the
// pricing-model and plan-tier signal lives.
const SEARCH_QUERY_SUFFIX: &str = " company pricing";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn firecrawl_api_key_from_env() -> Option<String> {
    env("TOOLSCOUT_FIRECRAWL_API_KEY").or_else(|| env("FIRECRAWL_API_KEY"))
}

fn firecrawl_endpoint_from_env() -> Option<String> {
    // For tests / enterprise proxies, allow overriding the API base.
    env("TOOLSCOUT_FIRECRAWL_ENDPOINT")
}

/// Firecrawl v2 search + scrape adapter.
///
/// The public [`search`](Self::search) and [`scrape`](Self::scrape) methods
/// contain provider failures: they log and return empty/`None` instead of
/// propagating, so callers treat "nothing came back" as a normal outcome.
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl FirecrawlClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        let endpoint = firecrawl_endpoint_from_env()
            .unwrap_or_else(|| "https://api.firecrawl.dev".to_string());
        Self {
            client,
            api_key: api_key.into(),
            endpoint,
        }
    }

    /// Fail fast on a missing credential: a client without a key would turn
    /// every search into a silent empty result, which is much harder to
    /// diagnose than an error at startup.
    pub fn from_env(client: reqwest::Client) -> Result<Self> {
        let api_key = firecrawl_api_key_from_env().ok_or_else(|| {
            Error::NotConfigured(
                "missing TOOLSCOUT_FIRECRAWL_API_KEY (or FIRECRAWL_API_KEY)".to_string(),
            )
        })?;
        Ok(Self::new(client, api_key))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn endpoint_search(&self) -> String {
        format!("{}/v2/search", self.endpoint.trim_end_matches('/'))
    }

    fn endpoint_scrape(&self) -> String {
        format!("{}/v2/scrape", self.endpoint.trim_end_matches('/'))
    }

    async fn try_search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let body = serde_json::json!({
            "query": format!("{query}{SEARCH_QUERY_SUFFIX}"),
            "limit": limit,
            "scrapeOptions": { "formats": ["markdown"] },
        });

        let resp = self
            .client
            .post(self.endpoint_search())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Search(format!("firecrawl search HTTP {status}")));
        }

        let parsed: FirecrawlSearchResponse =
            resp.json().await.map_err(|e| Error::Search(e.to_string()))?;
        if !parsed.success {
            return Err(Error::Search(
                "firecrawl search returned success=false".to_string(),
            ));
        }

        Ok(parsed.data.and_then(|d| d.web).unwrap_or_default())
    }

    async fn try_scrape(&self, url: &str) -> Result<Option<String>> {
        let body = serde_json::json!({
            "url": url,
            "formats": ["markdown"],
        });

        let resp = self
            .client
            .post(self.endpoint_scrape())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Scrape(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Scrape(format!("firecrawl scrape HTTP {status}")));
        }

        let parsed: FirecrawlScrapeResponse =
            resp.json().await.map_err(|e| Error::Scrape(e.to_string()))?;
        if !parsed.success {
            return Err(Error::Scrape(
                "firecrawl scrape returned success=false".to_string(),
            ));
        }

        Ok(parsed
            .data
            .and_then(|d| d.markdown)
            .filter(|m| !m.is_empty()))
    }

    /// Search with the fixed pricing-oriented suffix. Provider failures are
    /// contained: logged, then an empty result set.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        match self.try_search(query, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query, error = %e, "search failed, continuing with no results");
                Vec::new()
            }
        }
    }

    /// Scrape one URL as markdown. Failures are contained: logged, then `None`.
    pub async fn scrape(&self, url: &str) -> Option<String> {
        match self.try_scrape(url).await {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!(url, error = %e, "scrape failed, continuing without content");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for FirecrawlClient {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        FirecrawlClient::search(self, query, limit).await
    }
}

#[async_trait::async_trait]
impl ScrapeBackend for FirecrawlClient {
    async fn scrape(&self, url: &str) -> Option<String> {
        FirecrawlClient::scrape(self, url).await
    }
}

#[derive(Debug, Deserialize)]
struct FirecrawlSearchResponse {
    success: bool,
    data: Option<FirecrawlSearchData>,
}

#[derive(Debug, Deserialize)]
struct FirecrawlSearchData {
    web: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct FirecrawlScrapeResponse {
    success: bool,
    data: Option<FirecrawlScrapeData>,
}

#[derive(Debug, Deserialize)]
struct FirecrawlScrapeData {
    markdown: Option<String>,
}
