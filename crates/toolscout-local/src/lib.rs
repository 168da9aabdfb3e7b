//! Local (reqwest) provider adapters for toolscout.

pub mod firecrawl;
pub mod openai_compat;

pub use firecrawl::FirecrawlClient;
pub use openai_compat::OpenAiCompatClient;

pub(crate) fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
