use serde::Deserialize;

/// Envelope of a SerpAPI `search.json` response; fields we do not read are
/// ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

/// One organic search result.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

/// A `(link, text)` pair of changelog evidence for one competitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSnippet {
    pub url: String,
    pub text: String,
}
