//! Normalization of heterogeneous search/scrape results into prompt text.

use toolscout_core::prompts::truncate_chars;
use toolscout_core::{ScrapeBackend, SearchHit};

/// Per-page cap on text fed into the extraction prompt.
const PAGE_CONTENT_CAP: usize = 2000;

/// Cap on cleaned content handed to the analysis stage (the prompt builder
/// trims further).
const ANALYSIS_CONTENT_CAP: usize = 8000;

/// Scrape every resolvable hit and combine the page text, capped per page.
///
/// Strictly sequential, no URL dedup. Hits with no resolvable URL are logged
/// and skipped; an empty accumulator is a valid outcome.
pub async fn extract_text<S: ScrapeBackend>(hits: &[SearchHit], scraper: &S) -> String {
    let mut combined = String::new();

    for hit in hits {
        let Some(url) = hit.resolved_url() else {
            tracing::warn!(?hit, "search result has no resolvable url, skipping");
            continue;
        };
        tracing::info!(url, "scraping page content");
        if let Some(markdown) = scraper.scrape(url).await {
            combined.push_str(truncate_chars(&markdown, PAGE_CONTENT_CAP));
            combined.push_str("\n\n");
        }
    }

    combined
}

/// Resolve a single hit into `(url, content)`. Either side may be absent
/// independently: URL via the two-shape rule, content from the direct
/// markdown field only.
pub fn extract_url_and_content(hit: &SearchHit) -> (Option<String>, Option<String>) {
    let url = hit.resolved_url().map(str::to_string);
    let content = hit
        .markdown
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(str::to_string);
    (url, content)
}

/// Collapse runs of whitespace to single spaces and cap the result.
/// Scraped markdown is full of navigation filler and blank lines that
/// would otherwise eat the analysis prompt's content window.
pub fn collapse_whitespace(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, ANALYSIS_CONTENT_CAP).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolscout_core::types::HitMetadata;

    struct FixedScraper(Option<String>);

    #[async_trait::async_trait]
    impl ScrapeBackend for FixedScraper {
        async fn scrape(&self, _url: &str) -> Option<String> {
            self.0.clone()
        }
    }

    fn meta_hit(url: &str) -> SearchHit {
        SearchHit {
            url: None,
            metadata: Some(HitMetadata {
                url: Some(url.to_string()),
            }),
            markdown: None,
        }
    }

    #[tokio::test]
    async fn extract_text_caps_each_page_and_separates() {
        let hits = vec![meta_hit("https://a.example"), meta_hit("https://b.example")];
        let scraper = FixedScraper(Some("y".repeat(5000)));

        let combined = extract_text(&hits, &scraper).await;
        // Two pages, 2000 chars each plus a blank-line separator.
        assert_eq!(combined.len(), 2 * (2000 + 2));
        assert!(combined.contains("\n\n"));
    }

    #[tokio::test]
    async fn extract_text_skips_hits_without_url() {
        let hits = vec![SearchHit::default(), meta_hit("https://a.example")];
        let scraper = FixedScraper(Some("page".to_string()));

        let combined = extract_text(&hits, &scraper).await;
        assert_eq!(combined, "page\n\n");
    }

    #[tokio::test]
    async fn extract_text_is_empty_when_nothing_scrapes() {
        let hits = vec![meta_hit("https://a.example")];
        let scraper = FixedScraper(None);
        assert!(extract_text(&hits, &scraper).await.is_empty());
    }

    #[test]
    fn url_and_content_are_independent() {
        let hit = meta_hit("https://x.com");
        assert_eq!(
            extract_url_and_content(&hit),
            (Some("https://x.com".to_string()), None)
        );

        let hit = SearchHit {
            url: None,
            metadata: None,
            markdown: Some("content only".to_string()),
        };
        assert_eq!(
            extract_url_and_content(&hit),
            (None, Some("content only".to_string()))
        );
    }

    #[test]
    fn collapse_whitespace_flattens_and_caps() {
        assert_eq!(collapse_whitespace("a\n\n  b\tc  "), "a b c");
        let long = "word ".repeat(5000);
        assert_eq!(collapse_whitespace(&long).chars().count(), 8000);
    }
}
