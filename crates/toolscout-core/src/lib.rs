pub mod parse;
pub mod prompts;
pub mod types;

pub use types::{PricingModel, RunState, SearchHit, ToolAnalysis, ToolRecord};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("search failed: {0}")]
    Search(String),
    #[error("scrape failed: {0}")]
    Scrape(String),
    #[error("llm failed: {0}")]
    Llm(String),
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Web search over a provider. Provider failures are contained by the
/// implementation: an empty result set is a valid, non-exceptional outcome
/// and callers must treat it as such.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit>;
}

/// Single-page markdown scraping. Failures are contained: `None` means
/// "no content", whatever the underlying cause.
#[async_trait::async_trait]
pub trait ScrapeBackend: Send + Sync {
    async fn scrape(&self, url: &str) -> Option<String>;
}

/// One chat-completion round trip. Unlike search/scrape, failures here
/// propagate; each call site decides whether to degrade.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, system: &str, user: &str) -> Result<String>;
}
