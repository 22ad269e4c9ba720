//! HTTP client for the SerpAPI search endpoint.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization. The provider reports some failures inside a 200 response
//! as an `{"error": ...}` envelope; those surface as [`SerpError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SerpError;
use crate::types::{OrganicResult, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const SEARCH_ENGINE: &str = "google";

/// Client for the SerpAPI web-search API.
///
/// Use [`SerpClient::new`] for production or [`SerpClient::with_base_url`] to
/// point at a mock server in tests.
pub struct SerpClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpClient {
    /// Creates a new client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, SerpError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`SerpError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SerpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rivalscan/0.1 (competitor-reports)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends rather than replaces the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SerpError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs one web search and returns the organic results in provider order.
    ///
    /// # Errors
    ///
    /// - [`SerpError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SerpError::Api`] if the provider returns an error envelope.
    /// - [`SerpError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<OrganicResult>, SerpError> {
        let url = self.build_url(query, limit)?;

        tracing::debug!(query, limit, "serp search request");

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SerpError::Deserialize {
                context: format!("search(query={query})"),
                source: e,
            })?;

        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return Err(SerpError::Api(message.to_string()));
        }

        let parsed: SearchResponse =
            serde_json::from_value(value).map_err(|e| SerpError::Deserialize {
                context: format!("search(query={query})"),
                source: e,
            })?;

        Ok(parsed.organic_results)
    }

    /// Fetches a page body as text, for changelog extraction.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] on network failure or non-2xx HTTP status.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<String, SerpError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Builds the full search URL with properly percent-encoded parameters.
    fn build_url(&self, query: &str, limit: usize) -> Result<Url, SerpError> {
        let mut url = self
            .base_url
            .join("search.json")
            .map_err(|e| SerpError::Api(format!("invalid search URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", SEARCH_ENGINE);
            pairs.append_pair("q", query);
            pairs.append_pair("num", &limit.to_string());
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SerpClient {
        SerpClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://serpapi.com");
        let url = client.build_url("acme competitors", 5).expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search.json?engine=google&q=acme+competitors&num=5&api_key=test-key"
        );
    }

    #[test]
    fn build_url_keeps_base_path_segments() {
        let client = test_client("http://127.0.0.1:9000/serp/");
        let url = client.build_url("acme", 10).expect("valid url");
        assert!(url.as_str().starts_with("http://127.0.0.1:9000/serp/search.json?"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(SerpClient::with_base_url("k", 30, "not a url").is_err());
    }
}
