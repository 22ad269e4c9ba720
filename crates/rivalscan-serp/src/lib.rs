//! Search-provider integration for rivalscan.
//!
//! Wraps the SerpAPI search endpoint and normalizes raw results into
//! competitor candidates, product descriptions, and changelog snippets.

pub mod changelog;
pub mod client;
pub mod collector;
pub mod error;
pub mod types;

pub use changelog::changelog_snippets;
pub use client::SerpClient;
pub use collector::{discover_competitors, product_description};
pub use error::SerpError;
pub use types::{ChangelogSnippet, OrganicResult};
