//! Competitor discovery and product-description lookup.

use std::collections::HashSet;

use rivalscan_core::CompetitorCandidate;

use crate::client::SerpClient;
use crate::error::SerpError;
use crate::types::OrganicResult;

/// Title fragments after any of these separators are site branding, not the
/// competitor name.
const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " — ", " – ", ": "];

/// Discover competitor candidates for a product.
///
/// Runs one search for `"{product} competitors alternatives"` and normalizes
/// the organic results: provider order is preserved, duplicate names are
/// removed case-insensitively, results naming the target product itself are
/// skipped, and at most `limit` candidates are returned.
///
/// # Errors
///
/// Returns [`SerpError`] if the search call fails.
pub async fn discover_competitors(
    client: &SerpClient,
    product: &str,
    limit: usize,
) -> Result<Vec<CompetitorCandidate>, SerpError> {
    let query = format!("{product} competitors alternatives");
    let results = client.search(&query, limit.saturating_mul(2)).await?;

    let mut seen_names: HashSet<String> = HashSet::new();
    let candidates: Vec<CompetitorCandidate> = results
        .into_iter()
        .filter_map(|result| candidate_from_result(&result))
        .filter(|candidate| !candidate.name.eq_ignore_ascii_case(product))
        .filter(|candidate| seen_names.insert(candidate.name.to_lowercase()))
        .take(limit)
        .collect();

    tracing::debug!(
        product,
        count = candidates.len(),
        "normalized competitor candidates"
    );

    Ok(candidates)
}

/// Look up a one-line product description.
///
/// Returns the first non-empty snippet for
/// `"{product} {niche} tool description"`, falling back to a generic line
/// when the search comes back empty.
///
/// # Errors
///
/// Returns [`SerpError`] if the search call fails.
pub async fn product_description(
    client: &SerpClient,
    product: &str,
    niche: Option<&str>,
) -> Result<String, SerpError> {
    let query = match niche {
        Some(n) => format!("{product} {n} tool description"),
        None => format!("{product} tool description"),
    };
    let results = client.search(&query, 10).await?;

    let description = results
        .iter()
        .filter_map(|r| r.snippet.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToString::to_string);

    Ok(description.unwrap_or_else(|| match niche {
        Some(n) => format!("{product} in the {n} space."),
        None => format!("{product}."),
    }))
}

fn candidate_from_result(result: &OrganicResult) -> Option<CompetitorCandidate> {
    let url = result.link.as_deref()?.trim();
    let title = result.title.as_deref()?.trim();
    if url.is_empty() || title.is_empty() {
        return None;
    }

    let name = candidate_name_from_title(title);
    if name.is_empty() {
        return None;
    }

    Some(CompetitorCandidate {
        name,
        url: url.to_string(),
        source_snippet: result
            .snippet
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
    })
}

/// Derive a candidate name from a search result title by cutting branding
/// suffixes like `" - G2"` or `" | Capterra"`.
fn candidate_name_from_title(title: &str) -> String {
    let mut name = title;
    for separator in TITLE_SEPARATORS {
        if let Some((head, _)) = name.split_once(separator) {
            name = head;
        }
    }
    name.trim().to_string()
}
