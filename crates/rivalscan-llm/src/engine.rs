//! Comparison and update-digest orchestration.

use rivalscan_core::{Comparison, CompetitorCandidate, UpdateDigest};
use rivalscan_serp::ChangelogSnippet;

use crate::client::OpenRouterClient;
use crate::error::LlmError;
use crate::parser::parse_comparison;
use crate::prompts;

/// Produce one structured comparison per candidate, in candidate order.
///
/// One generation request per candidate; the free-text response is parsed
/// with the marker extractor, so a response missing sections still yields a
/// comparison (with empty lists) rather than failing the run.
///
/// # Errors
///
/// Returns [`LlmError`] if a generation call fails or returns no text.
pub async fn compare_candidates(
    client: &OpenRouterClient,
    target: &str,
    description: &str,
    candidates: &[CompetitorCandidate],
    aspects: &[String],
) -> Result<Vec<Comparison>, LlmError> {
    let mut comparisons = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let prompt = prompts::build_comparison_prompt(target, description, candidate, aspects);
        let text = client.chat(prompts::ANALYST_SYSTEM, &prompt).await?;
        let sections = parse_comparison(&text);

        tracing::debug!(
            competitor = %candidate.name,
            strengths = sections.strengths.len(),
            weaknesses = sections.weaknesses.len(),
            use_cases = sections.use_cases.len(),
            improvements = sections.improvements.len(),
            "parsed comparison"
        );

        comparisons.push(Comparison {
            target_name: target.to_string(),
            competitor_name: candidate.name.clone(),
            strengths: sections.strengths,
            weaknesses: sections.weaknesses,
            use_cases: sections.use_cases,
            improvements: sections.improvements,
        });
    }

    Ok(comparisons)
}

/// Summarize changelog evidence for one competitor.
///
/// An empty snippet list short-circuits to a fixed "no recent updates" line
/// without a network call.
///
/// # Errors
///
/// Returns [`LlmError`] if the generation call fails or returns no text.
pub async fn summarize_updates(
    client: &OpenRouterClient,
    competitor: &str,
    snippets: &[ChangelogSnippet],
) -> Result<UpdateDigest, LlmError> {
    if snippets.is_empty() {
        return Ok(UpdateDigest {
            competitor_name: competitor.to_string(),
            summary: format!("No recent updates found for {competitor}."),
            sources: Vec::new(),
        });
    }

    let prompt = prompts::build_updates_prompt(competitor, snippets);
    let summary = client.chat(prompts::ANALYST_SYSTEM, &prompt).await?;

    let mut sources: Vec<String> = Vec::new();
    for snippet in snippets {
        if !snippet.url.is_empty() && !sources.contains(&snippet.url) {
            sources.push(snippet.url.clone());
        }
    }

    Ok(UpdateDigest {
        competitor_name: competitor.to_string(),
        summary: summary.trim().to_string(),
        sources,
    })
}
