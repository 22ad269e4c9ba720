//! Report layout assembly.
//!
//! Builds the ordered line list for a report as a pure function over the
//! inputs, so section ordering and placeholder behavior are testable without
//! decoding PDF bytes. The PDF writer consumes these lines verbatim.

use chrono::{DateTime, Utc};
use rivalscan_core::{Comparison, UpdateDigest};

/// One logical line of report content, tagged with its display role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    Title(String),
    Heading(String),
    SubHeading(String),
    Text(String),
    Blank,
}

pub(crate) const NO_DATA_HEADING: &str = "No competitor data";

/// Assemble the line list for a comparison report.
///
/// One section per comparison, in input order; a placeholder section when
/// there are no comparisons.
pub(crate) fn comparison_lines(
    target: &str,
    comparisons: &[Comparison],
    generated_at: DateTime<Utc>,
) -> Vec<Line> {
    let mut lines = title_block(
        &format!("Competitor Report: {target}"),
        target,
        generated_at,
        comparisons.len(),
    );

    if comparisons.is_empty() {
        lines.push(Line::Heading(NO_DATA_HEADING.to_string()));
        lines.push(Line::Text(format!(
            "No competitors could be identified for {target}. Try a broader product name."
        )));
        lines.push(Line::Blank);
    }

    for comparison in comparisons {
        lines.push(Line::Heading(comparison.competitor_name.clone()));
        push_list(&mut lines, "Strengths", &comparison.strengths);
        push_list(&mut lines, "Weaknesses", &comparison.weaknesses);
        push_list(&mut lines, "Use Cases", &comparison.use_cases);
        push_list(&mut lines, "Improvements", &comparison.improvements);
        lines.push(Line::Blank);
    }

    lines.push(Line::Text(format!(
        "End of report. Compared {target} against {} competitor(s).",
        comparisons.len()
    )));

    lines
}

/// Assemble the line list for a competitor-updates report.
pub(crate) fn updates_lines(
    target: &str,
    digests: &[UpdateDigest],
    generated_at: DateTime<Utc>,
) -> Vec<Line> {
    let mut lines = title_block(
        &format!("Competitor Updates: {target}"),
        target,
        generated_at,
        digests.len(),
    );

    if digests.is_empty() {
        lines.push(Line::Heading(NO_DATA_HEADING.to_string()));
        lines.push(Line::Text(
            "No competitor updates were collected.".to_string(),
        ));
        lines.push(Line::Blank);
    }

    for digest in digests {
        lines.push(Line::Heading(digest.competitor_name.clone()));
        lines.push(Line::Text(digest.summary.clone()));
        if !digest.sources.is_empty() {
            lines.push(Line::SubHeading("Sources".to_string()));
            for source in &digest.sources {
                lines.push(Line::Text(format!("- {source}")));
            }
        }
        lines.push(Line::Blank);
    }

    lines.push(Line::Text(format!(
        "End of report. Tracked {} competitor(s).",
        digests.len()
    )));

    lines
}

fn title_block(
    title: &str,
    target: &str,
    generated_at: DateTime<Utc>,
    section_count: usize,
) -> Vec<Line> {
    vec![
        Line::Title(title.to_string()),
        Line::Text(format!("Product: {target}")),
        Line::Text(format!(
            "Generated: {}",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        )),
        Line::Text(format!("Sections: {section_count}")),
        Line::Blank,
    ]
}

fn push_list(lines: &mut Vec<Line>, label: &str, items: &[String]) {
    lines.push(Line::SubHeading(label.to_string()));
    if items.is_empty() {
        lines.push(Line::Text("(none)".to_string()));
        return;
    }
    for item in items {
        lines.push(Line::Text(format!("- {item}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comparison(competitor: &str) -> Comparison {
        Comparison {
            target_name: "Acme".to_string(),
            competitor_name: competitor.to_string(),
            strengths: vec!["Faster".to_string()],
            weaknesses: vec![],
            use_cases: vec!["Startups".to_string()],
            improvements: vec!["Add SSO".to_string()],
        }
    }

    fn headings(lines: &[Line]) -> Vec<&str> {
        lines
            .iter()
            .filter_map(|line| match line {
                Line::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_section_per_comparison_in_input_order() {
        let comparisons = vec![comparison("Globex"), comparison("Initech")];
        let lines = comparison_lines("Acme", &comparisons, Utc::now());

        assert_eq!(headings(&lines), vec!["Globex", "Initech"]);
    }

    #[test]
    fn empty_lists_render_a_none_placeholder() {
        let lines = comparison_lines("Acme", &[comparison("Globex")], Utc::now());

        let weaknesses_at = lines
            .iter()
            .position(|l| *l == Line::SubHeading("Weaknesses".to_string()))
            .expect("weaknesses subheading present");
        assert_eq!(lines[weaknesses_at + 1], Line::Text("(none)".to_string()));
    }

    #[test]
    fn zero_comparisons_render_the_placeholder_section() {
        let lines = comparison_lines("Acme", &[], Utc::now());

        assert_eq!(headings(&lines), vec![NO_DATA_HEADING]);
        assert!(matches!(lines.last(), Some(Line::Text(t)) if t.contains("0 competitor(s)")));
    }

    #[test]
    fn updates_report_lists_sources_per_competitor() {
        let digest = UpdateDigest {
            competitor_name: "Globex".to_string(),
            summary: "Shipped v2.".to_string(),
            sources: vec!["https://globex.example/changelog".to_string()],
        };
        let lines = updates_lines("Acme", &[digest], Utc::now());

        assert_eq!(headings(&lines), vec!["Globex"]);
        assert!(lines
            .iter()
            .any(|l| *l == Line::Text("- https://globex.example/changelog".to_string())));
    }
}
