use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error: {0}")]
    Api(String),

    #[error("failed to deserialize response from {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
