use toolscout_core::{
    parse, prompts, ChatModel, PricingModel, Result, RunState, ScrapeBackend, SearchBackend,
    ToolAnalysis, ToolRecord,
};

use crate::content;

/// Stage 2 researches at most this many candidates (the original query plus
/// the top extracted alternatives).
const MAX_CANDIDATES: usize = 4;

const DEFAULT_ARTICLE_SEARCH_LIMIT: usize = 3;

/// Placeholder when the analysis call or its parse failed.
const ANALYSIS_FAILED_DESCRIPTION: &str = "Analysis failed due to an error.";
/// Placeholder when no page content could be obtained at all. Kept distinct
/// from the analysis-failure text so the two causes stay distinguishable in
/// the final record.
const NO_CONTENT_DESCRIPTION: &str = "Content retrieval failed.";

/// Build the stage-2 candidate list: the original query first, then extracted
/// alternatives with case-insensitive duplicates of the query removed, capped
/// at [`MAX_CANDIDATES`]. Order is significant and preserved.
pub fn candidate_list(query: &str, extracted: &[String]) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let mut out = vec![query.to_string()];
    out.extend(
        extracted
            .iter()
            .filter(|t| t.to_lowercase() != query_lower)
            .cloned(),
    );
    out.truncate(MAX_CANDIDATES);
    out
}

/// Linear three-stage research pipeline. Stages run in a fixed order, each
/// stage's output is the next one's sole input, and all external calls are
/// sequential.
pub struct Pipeline<P, M> {
    provider: P,
    model: M,
    article_search_limit: usize,
}

impl<P, M> Pipeline<P, M>
where
    P: SearchBackend + ScrapeBackend,
    M: ChatModel,
{
    pub fn new(provider: P, model: M) -> Self {
        Self {
            provider,
            model,
            article_search_limit: DEFAULT_ARTICLE_SEARCH_LIMIT,
        }
    }

    pub fn with_article_search_limit(mut self, limit: usize) -> Self {
        self.article_search_limit = limit;
        self
    }

    /// Run all three stages. Stages 1 and 2 degrade on failure; a chat
    /// failure in stage 3 is the only error that propagates.
    pub async fn run(&self, query: &str) -> Result<RunState> {
        let mut state = RunState::new(query);
        self.extract_tools(&mut state).await;
        self.research(&mut state).await;
        self.analyze(&mut state).await?;
        Ok(state)
    }

    /// Stage 1: find comparison articles and extract alternative tool names.
    /// Any failure degrades to an empty tool list; stage 2 always runs.
    async fn extract_tools(&self, state: &mut RunState) {
        tracing::info!(query = %state.query, "finding comparison articles");
        let article_query = format!("{} tools comparison best alternatives", state.query);
        let hits = self
            .provider
            .search(&article_query, self.article_search_limit)
            .await;
        let combined = content::extract_text(&hits, &self.provider).await;

        let (system, user) = prompts::tool_extraction(&state.query, &combined);
        match self.model.chat(system, &user).await {
            Ok(response) => {
                state.extracted_tools = parse::parse_tool_names(&response, &state.query);
                tracing::info!(tools = ?state.extracted_tools, "extracted alternatives");
            }
            Err(e) => {
                tracing::warn!(error = %e, "tool extraction failed, continuing with no alternatives");
                state.extracted_tools = Vec::new();
            }
        }
    }

    /// Stage 2: research each candidate's official site, one record per
    /// candidate that yields a URL, appended in candidate order.
    async fn research(&self, state: &mut RunState) {
        let candidates = candidate_list(&state.query, &state.extracted_tools);
        tracing::info!(?candidates, "researching candidate tools");

        for name in candidates {
            let hits = self
                .provider
                .search(&format!("{name} official site"), 1)
                .await;
            let Some(hit) = hits.first() else {
                tracing::warn!(%name, "no search results for candidate, skipping");
                continue;
            };

            let (url, mut page_content) = content::extract_url_and_content(hit);
            let Some(url) = url else {
                tracing::warn!(%name, "no url in search result, skipping candidate");
                continue;
            };
            if page_content.is_none() {
                page_content = self.provider.scrape(&url).await;
            }

            let mut record = ToolRecord::new(&name, &url);
            match page_content {
                Some(text) => match self.analyze_tool(&name, &text).await {
                    Ok(analysis) => record.apply_analysis(analysis),
                    Err(e) => {
                        tracing::warn!(%name, error = %e, "analysis failed for candidate");
                        record.pricing_model = PricingModel::Unknown;
                        record.description = ANALYSIS_FAILED_DESCRIPTION.to_string();
                    }
                },
                None => {
                    tracing::warn!(%name, url, "could not retrieve content for candidate");
                    record.description = NO_CONTENT_DESCRIPTION.to_string();
                }
            }
            state.companies.push(record);
        }
    }

    async fn analyze_tool(&self, name: &str, page_content: &str) -> Result<ToolAnalysis> {
        tracing::info!(%name, "analyzing page content");
        let cleaned = content::collapse_whitespace(page_content);
        let (system, user) = prompts::tool_analysis(name, &cleaned);
        let response = self.model.chat(system, &user).await?;
        parse::parse_analysis(&response)
    }

    /// Stage 3: one recommendation over every researched record. The model's
    /// raw text is stored unparsed; a chat failure here propagates.
    async fn analyze(&self, state: &mut RunState) -> Result<()> {
        tracing::info!("generating final recommendation");
        let mut serialized = Vec::with_capacity(state.companies.len());
        for record in &state.companies {
            serialized.push(
                serde_json::to_string(record)
                    .map_err(|e| toolscout_core::Error::Parse(e.to_string()))?,
            );
        }
        let blob = serialized.join(", ");

        let (system, user) = prompts::recommendation(&state.query, &blob);
        state.analysis = Some(self.model.chat(system, &user).await?);
        Ok(())
    }
}
