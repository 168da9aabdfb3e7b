//! Fixed prompt text for the three pipeline tasks. Pure functions: no
//! state, no IO. Each returns `(system, user)` message text.

/// Analysis-prompt content cap, in chars. Pages routinely run far longer;
/// the head of an official site carries the pricing/stack signal.
const ANALYSIS_PROMPT_CONTENT_CAP: usize = 2500;

/// Truncate at a char boundary. Byte slicing would panic mid-codepoint on
/// scraped multilingual pages.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

pub const TOOL_EXTRACTION_SYSTEM: &str = "You are a senior solutions architect specializing in developer tool ecosystems. \
Your expertise lies in identifying competing and alternative platforms, not just related technologies. \
You are precise and ignore tools that are merely components or partners of the queried tool.";

pub fn tool_extraction(query: &str, content: &str) -> (&'static str, String) {
    let user = format!(
        r#"Primary Tool for Comparison: "{query}"

Article Content to Analyze:
---
{content}
---

Your Task:
From the article content, extract a list of tools that are direct alternatives or competitors to "{query}".
They should solve the same core problem and target a similar developer need.

Critical Rules to Follow:
1. Focus on the replacement relationship: extracted tools must be something a developer would choose instead of "{query}", not in addition to it.
2. Strictly exclude ecosystem partners: do NOT extract foundational models, vector databases, cloud providers, or any tool that integrates with or is a component used by "{query}".
3. Limit to the top 5 most relevant and direct alternatives.
4. Clean, list-only output: just the tool names, one per line. No numbers, no bullet points, no explanations.

Example output format:
Supabase
Appwrite
Nhost"#
    );
    (TOOL_EXTRACTION_SYSTEM, user)
}

pub const TOOL_ANALYSIS_SYSTEM: &str = "You are analyzing developer tools and programming technologies. \
Focus on extracting information relevant to programmers and software developers. \
Pay special attention to programming languages, frameworks, APIs, SDKs, and development workflows.";

pub fn tool_analysis(name: &str, content: &str) -> (&'static str, String) {
    let content = truncate_chars(content, ANALYSIS_PROMPT_CONTENT_CAP);
    let user = format!(
        r#"Company/Tool: {name}
Website Content: {content}

Analyze this content from a developer's perspective and reply with a JSON object containing:
- pricing_model: one of "Free", "Freemium", "Paid", "Enterprise", or "Unknown"
- is_open_source: true if open source, false if proprietary, null if unclear
- tech_stack: list of programming languages, frameworks, databases, APIs, or technologies supported/used
- description: brief 1-sentence description focusing on what this tool does for developers
- api_available: true if REST API, GraphQL, SDK, or programmatic access is mentioned
- language_support: list of programming languages explicitly supported (e.g. Python, JavaScript, Go)
- integration_capabilities: list of tools/platforms it integrates with (e.g. GitHub, VS Code, Docker, AWS)

Focus on developer-relevant features like APIs, SDKs, language support, integrations, and development workflows."#
    );
    (TOOL_ANALYSIS_SYSTEM, user)
}

pub const RECOMMENDATIONS_SYSTEM: &str = "You are a senior software engineer providing quick, concise tech recommendations. \
Keep responses brief and actionable - maximum 3-4 sentences total.";

pub fn recommendation(query: &str, records_blob: &str) -> (&'static str, String) {
    let user = format!(
        r#"Developer Query: {query}
Tools/Technologies Analyzed: {records_blob}

Provide a brief recommendation (3-4 sentences max) covering:
- Which tool is best and why
- Key cost/pricing consideration
- Main technical advantage

Be concise and direct - no long explanations needed."#
    );
    (RECOMMENDATIONS_SYSTEM, user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn analysis_prompt_caps_content() {
        // Sentinel char that cannot occur in the fixed template text.
        let content = "\u{2603}".repeat(10_000);
        let (_, user) = tool_analysis("Tool", &content);
        let count = user.chars().filter(|c| *c == '\u{2603}').count();
        assert_eq!(count, 2500);
    }

    #[test]
    fn prompts_embed_their_inputs() {
        let (system, user) = tool_extraction("langchain", "some article");
        assert!(system.contains("solutions architect"));
        assert!(user.contains("langchain"));
        assert!(user.contains("some article"));

        let (_, user) = recommendation("langchain", "{\"name\":\"x\"}");
        assert!(user.contains("langchain"));
        assert!(user.contains("{\"name\":\"x\"}"));
    }
}
