use serde::{Deserialize, Serialize};

/// Mutable context threaded through the pipeline's three stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub query: String,
    pub extracted_tools: Vec<String>,
    pub companies: Vec<ToolRecord>,
    pub analysis: Option<String>,
}

impl RunState {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            extracted_tools: Vec::new(),
            companies: Vec::new(),
            analysis: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    Enterprise,
    // Models free-type this field; anything unrecognized degrades to Unknown
    // instead of failing the whole decode.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Normalized structured profile of one researched tool.
///
/// Invariant: list-valued fields are never null. Absence in the model's
/// output normalizes to an empty vec before a record is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub pricing_model: PricingModel,
    pub is_open_source: Option<bool>,
    pub tech_stack: Vec<String>,
    pub api_available: Option<bool>,
    pub language_support: Vec<String>,
    pub integration_capabilities: Vec<String>,
}

impl ToolRecord {
    pub fn new(name: &str, website: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            website: Some(website.to_string()),
            pricing_model: PricingModel::Unknown,
            is_open_source: None,
            tech_stack: Vec::new(),
            api_available: None,
            language_support: Vec::new(),
            integration_capabilities: Vec::new(),
        }
    }

    /// Merge the analyzable subset from a parsed model response.
    pub fn apply_analysis(&mut self, analysis: ToolAnalysis) {
        self.pricing_model = analysis.pricing_model;
        self.is_open_source = analysis.is_open_source;
        self.tech_stack = analysis.tech_stack;
        self.description = analysis.description;
        self.api_available = analysis.api_available;
        self.language_support = analysis.language_support;
        self.integration_capabilities = analysis.integration_capabilities;
    }
}

/// The analyzable subset of [`ToolRecord`], decoded from model output by
/// [`crate::parse::parse_analysis`]. List fields are already normalized:
/// a null or missing list in the raw JSON becomes an empty vec here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolAnalysis {
    pub pricing_model: PricingModel,
    pub is_open_source: Option<bool>,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub api_available: Option<bool>,
    pub language_support: Vec<String>,
    pub integration_capabilities: Vec<String>,
}

/// One result from the search provider.
///
/// Providers expose the URL in two shapes: nested under a metadata object,
/// or as a direct field. Both are modeled explicitly and resolved by
/// [`SearchHit::resolved_url`]; a hit with neither is tolerated and skipped
/// downstream rather than failing the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub metadata: Option<HitMetadata>,
    #[serde(default)]
    pub markdown: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitMetadata {
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchHit {
    /// Resolve the hit's URL: metadata field first, then the direct field.
    pub fn resolved_url(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.url.as_deref())
            .or(self.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}
