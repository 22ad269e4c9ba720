use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comparison aspects used when the caller supplies none.
pub const DEFAULT_ASPECTS: &[&str] = &["User Interface", "Features", "Pricing"];

/// A provisional competitor identified by search, not yet analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorCandidate {
    /// Display name derived from the search result title.
    pub name: String,
    /// Link of the search result the candidate came from.
    pub url: String,
    /// Snippet text of that result, passed to the comparison prompt as context.
    pub source_snippet: String,
}

/// Structured strengths/weaknesses/use-cases/improvements record for one
/// competitor. Immutable once parsed; discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub target_name: String,
    pub competitor_name: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub use_cases: Vec<String>,
    pub improvements: Vec<String>,
}

/// A rendered report: opaque PDF bytes plus display metadata.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

impl ReportDocument {
    /// Attachment filename derived from the report title.
    #[must_use]
    pub fn filename(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("{stem}.pdf")
    }
}

/// Summarized changelog activity for one competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDigest {
    pub competitor_name: String,
    pub summary: String,
    /// Links the summarized snippets were collected from.
    pub sources: Vec<String>,
}
