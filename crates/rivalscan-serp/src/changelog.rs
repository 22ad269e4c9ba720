//! Changelog-snippet collection for competitor update digests.
//!
//! Primary source is a `"{competitor} changelog"` search; when that comes up
//! short, well-known changelog paths on the competitor's own domain are
//! fetched and their list items extracted.

use regex::Regex;
use reqwest::Url;

use crate::client::SerpClient;
use crate::error::SerpError;
use crate::types::ChangelogSnippet;

const KNOWN_CHANGELOG_PATHS: &[&str] = &["/changelog", "/release-notes", "/releases", "/updates"];
const MIN_ITEM_LEN: usize = 20;

/// Collect up to `max` changelog snippets for a competitor.
///
/// Search snippets are authoritative; the domain fallback only tops up when
/// the search yields fewer than `max`. Fallback fetch failures are logged and
/// skipped.
///
/// # Errors
///
/// Returns [`SerpError`] if the primary changelog search fails.
pub async fn changelog_snippets(
    client: &SerpClient,
    competitor: &str,
    max: usize,
) -> Result<Vec<ChangelogSnippet>, SerpError> {
    let query = format!("{competitor} changelog");
    let results = client.search(&query, max).await?;

    let mut snippets: Vec<ChangelogSnippet> = results
        .into_iter()
        .filter_map(|result| {
            let url = result.link.unwrap_or_default();
            let text = result.snippet.unwrap_or_default().trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(ChangelogSnippet { url, text })
        })
        .take(max)
        .collect();

    if snippets.len() < max {
        if let Some(domain) = guess_domain(client, competitor).await {
            fill_from_domain(client, &domain, max, &mut snippets).await;
        }
    }

    snippets.truncate(max);
    Ok(snippets)
}

/// Guess the competitor's domain from the first organic result for its name.
async fn guess_domain(client: &SerpClient, competitor: &str) -> Option<String> {
    let results = match client.search(competitor, 5).await {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!(competitor, error = %e, "domain guess search failed");
            return None;
        }
    };

    results
        .iter()
        .filter_map(|r| r.link.as_deref())
        .filter_map(|link| Url::parse(link).ok())
        .find_map(|url| url.host_str().map(ToString::to_string))
}

/// Fetch well-known changelog paths on `domain` and append extracted list
/// items until `max` snippets are collected.
async fn fill_from_domain(
    client: &SerpClient,
    domain: &str,
    max: usize,
    snippets: &mut Vec<ChangelogSnippet>,
) {
    for path in KNOWN_CHANGELOG_PATHS {
        if snippets.len() >= max {
            break;
        }

        let url = format!("https://{domain}{path}");
        let html = match client.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!(url, error = %e, "changelog page fetch failed");
                continue;
            }
        };

        for text in extract_list_items(&html, max - snippets.len()) {
            snippets.push(ChangelogSnippet {
                url: url.clone(),
                text,
            });
        }
    }
}

/// Extract the texts of `<li>` elements longer than [`MIN_ITEM_LEN`] chars.
fn extract_list_items(html: &str, max_items: usize) -> Vec<String> {
    let re = Regex::new(r"(?is)<li[^>]*>(.*?)</li>").expect("valid li regex");
    re.captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .filter(|text| text.len() > MIN_ITEM_LEN)
        .take(max_items)
        .collect()
}

fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let no_tags = tags.replace_all(input, " ");
    no_tags
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_only_substantial_list_items() {
        let html = r#"
            <ul>
              <li class="item">Added <b>bulk export</b> for workspace admins in v2.4</li>
              <li>Short one</li>
              <li>Fixed a crash when syncing more than 500 records at once</li>
            </ul>
        "#;

        let items = extract_list_items(html, 5);
        assert_eq!(
            items,
            vec![
                "Added bulk export for workspace admins in v2.4".to_string(),
                "Fixed a crash when syncing more than 500 records at once".to_string(),
            ]
        );
    }

    #[test]
    fn honors_max_items() {
        let html = "<li>A change entry that is certainly long enough</li>\
                    <li>Another change entry that is long enough too</li>";
        assert_eq!(extract_list_items(html, 1).len(), 1);
    }

    #[test]
    fn clean_text_strips_tags_and_collapses_whitespace() {
        assert_eq!(
            clean_text("  <a href=\"#\">New</a>\n  <em>release</em>  notes "),
            "New release notes"
        );
    }
}
