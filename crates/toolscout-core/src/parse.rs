use serde::Deserialize;

use crate::types::{PricingModel, ToolAnalysis};
use crate::{Error, Result};

// Boilerplate lead-ins the extraction prompt forbids but models emit anyway.
const BOILERPLATE_MARKERS: [&str; 2] = ["based on the", "here are"];

/// Clean a model's tool-name listing into an ordered name list.
///
/// Per line: drop empties and boilerplate lead-ins, strip an "N. " numbering
/// prefix (everything through the first '.'), and drop lines that
/// case-insensitively equal the original query. Input order is preserved.
pub fn parse_tool_names(response: &str, original_query: &str) -> Vec<String> {
    let query_lower = original_query.to_lowercase();
    let mut names = Vec::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if BOILERPLATE_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        let cleaned = match trimmed.find('.') {
            Some(i) => trimmed[i + 1..].trim(),
            None => trimmed,
        };
        if cleaned.is_empty() || cleaned.to_lowercase() == query_lower {
            continue;
        }
        names.push(cleaned.to_string());
    }

    names
}

/// Extract and decode the JSON object embedded in a model's analysis reply.
///
/// Models wrap the object in prose and code fences, so this takes the
/// substring between the first '{' and the last '}' rather than decoding the
/// reply wholesale. List fields that decoded as null or missing are replaced
/// with empty vecs; that normalization is part of the contract, not a
/// convenience.
pub fn parse_analysis(response: &str) -> Result<ToolAnalysis> {
    let (start, end) = match (response.find('{'), response.rfind('}')) {
        (Some(s), Some(e)) if e > s => (s, e),
        _ => {
            return Err(Error::Parse(
                "no JSON object found in model response".to_string(),
            ))
        }
    };

    let raw: RawAnalysis = serde_json::from_str(&response[start..=end])
        .map_err(|e| Error::Parse(e.to_string()))?;
    Ok(raw.normalize())
}

/// Decoded shape before normalization: list fields may be null or absent.
#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    pricing_model: PricingModel,
    #[serde(default)]
    is_open_source: Option<bool>,
    #[serde(default)]
    tech_stack: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    api_available: Option<bool>,
    #[serde(default)]
    language_support: Option<Vec<String>>,
    #[serde(default)]
    integration_capabilities: Option<Vec<String>>,
}

impl RawAnalysis {
    fn normalize(self) -> ToolAnalysis {
        ToolAnalysis {
            pricing_model: self.pricing_model,
            is_open_source: self.is_open_source,
            tech_stack: self.tech_stack.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            api_available: self.api_available,
            language_support: self.language_support.unwrap_or_default(),
            integration_capabilities: self.integration_capabilities.unwrap_or_default(),
        }
    }
}
