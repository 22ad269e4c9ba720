//! Prompt builders for the comparison analyst.
//!
//! The comparison prompt pins the four section markers the parser keys on;
//! changing the markers here requires a new parser version.

use rivalscan_core::CompetitorCandidate;
use rivalscan_serp::ChangelogSnippet;

pub const ANALYST_SYSTEM: &str = "You are an expert SaaS product analyst.";

/// Build the per-candidate comparison prompt.
#[must_use]
pub fn build_comparison_prompt(
    target: &str,
    description: &str,
    candidate: &CompetitorCandidate,
    aspects: &[String],
) -> String {
    let aspects_line = aspects.join(", ");
    let context = if candidate.source_snippet.is_empty() {
        String::new()
    } else {
        format!("What search says about them: {}\n", candidate.source_snippet)
    };

    format!(
        "Compare the product below against one competitor.\n\
         \n\
         Product: {target}\n\
         Description: {description}\n\
         Competitor: {name} ({url})\n\
         {context}\
         Aspects to weigh: {aspects_line}\n\
         \n\
         Answer with exactly these four sections, each a list of '-' bullet points:\n\
         \n\
         Strengths:\n\
         Weaknesses:\n\
         Use Cases:\n\
         Improvements:\n\
         \n\
         Strengths and weaknesses are {target}'s, relative to {name}. Use Cases are where \
         {target} is the better fit. Improvements are changes {target} needs to compete with \
         {name}.",
        name = candidate.name,
        url = candidate.url,
    )
}

/// Build the changelog-summary prompt for one competitor.
#[must_use]
pub fn build_updates_prompt(competitor: &str, snippets: &[ChangelogSnippet]) -> String {
    let evidence: String = snippets
        .iter()
        .map(|s| format!("- {} (Source: {})\n", s.text, s.url))
        .collect();

    format!(
        "Summarize the recent product updates of {competitor} in a short paragraph, \
         based only on the evidence below.\n\n{evidence}"
    )
}
