//! Report rendering for rivalscan.
//!
//! Turns structured comparisons (or update digests) into a paginated PDF.
//! Layout assembly is pure; only the final byte-stream write can fail.

use chrono::{DateTime, Utc};
use rivalscan_core::{Comparison, ReportDocument, UpdateDigest};

pub mod error;
mod layout;
mod pdf;

pub use error::ReportError;

/// Render the competitor-comparison report.
///
/// Every supplied comparison appears as one section, in input order; with no
/// comparisons the report still renders, with a placeholder section.
///
/// # Errors
///
/// Returns [`ReportError`] only if the PDF byte stream cannot be produced.
pub fn render_comparison_report(
    target: &str,
    comparisons: &[Comparison],
    generated_at: DateTime<Utc>,
) -> Result<ReportDocument, ReportError> {
    let title = format!("Competitor Report: {target}");
    let lines = layout::comparison_lines(target, comparisons, generated_at);
    let bytes = pdf::render_pdf(&title, &lines)?;

    tracing::info!(
        target,
        sections = comparisons.len(),
        bytes = bytes.len(),
        "rendered comparison report"
    );

    Ok(ReportDocument {
        title,
        generated_at,
        bytes,
    })
}

/// Render the competitor-updates report.
///
/// # Errors
///
/// Returns [`ReportError`] only if the PDF byte stream cannot be produced.
pub fn render_updates_report(
    target: &str,
    digests: &[UpdateDigest],
    generated_at: DateTime<Utc>,
) -> Result<ReportDocument, ReportError> {
    let title = format!("Competitor Updates: {target}");
    let lines = layout::updates_lines(target, digests, generated_at);
    let bytes = pdf::render_pdf(&title, &lines)?;

    tracing::info!(
        target,
        sections = digests.len(),
        bytes = bytes.len(),
        "rendered updates report"
    );

    Ok(ReportDocument {
        title,
        generated_at,
        bytes,
    })
}
