//! Rule-based extraction of comparison sections from model output.
//!
//! The extractor is keyed on a fixed marker set and is a pure function over
//! the response text: the same input always yields the same sections, and a
//! missing marker yields an empty list, never an error. A future response
//! format gets a new parser version rather than edits to this one.

/// Section lists extracted from one model response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSections {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub use_cases: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Strengths,
    Weaknesses,
    UseCases,
    Improvements,
}

/// Parse model output into the four comparison sections.
///
/// A line naming a marker (tolerating `#` heading prefixes, `**` emphasis,
/// bullets, and case differences) opens that section; subsequent non-empty
/// lines become its items until the next marker. Text before the first
/// marker is ignored.
#[must_use]
pub fn parse_comparison(text: &str) -> ComparisonSections {
    let mut sections = ComparisonSections::default();
    let mut current: Option<Section> = None;

    for raw in text.lines() {
        let line = strip_bullet(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some((section, inline_rest)) = match_marker(line) {
            current = Some(section);
            if let Some(item) = inline_rest {
                push_item(&mut sections, section, &item);
            }
            continue;
        }

        if let Some(section) = current {
            push_item(&mut sections, section, line);
        }
    }

    sections
}

/// Match a line against the marker set, returning the section and any text
/// that followed the marker colon on the same line.
fn match_marker(line: &str) -> Option<(Section, Option<String>)> {
    let stripped = line.trim_start_matches(['#', '>', ' ']).trim_matches('*').trim();

    let (head, rest) = match stripped.split_once(':') {
        Some((head, rest)) => (head, Some(rest)),
        None => (stripped, None),
    };

    let section = match head.trim().trim_matches('*').to_lowercase().as_str() {
        "strengths" => Section::Strengths,
        "weaknesses" => Section::Weaknesses,
        "use cases" => Section::UseCases,
        "improvements" => Section::Improvements,
        _ => return None,
    };

    let inline_rest = rest
        .map(|r| r.trim().trim_matches('*').trim().to_string())
        .filter(|r| !r.is_empty());

    Some((section, inline_rest))
}

fn push_item(sections: &mut ComparisonSections, section: Section, item: &str) {
    let cleaned = item.trim_matches('*').trim();
    if cleaned.is_empty() {
        return;
    }
    let list = match section {
        Section::Strengths => &mut sections.strengths,
        Section::Weaknesses => &mut sections.weaknesses,
        Section::UseCases => &mut sections.use_cases,
        Section::Improvements => &mut sections.improvements,
    };
    list.push(cleaned.to_string());
}

/// Strip a leading `- `, `* `, `• `, or `12. ` bullet prefix.
fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start();
    for prefix in ["- ", "* ", "• "] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return rest;
        }
    }

    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix(". ") {
            return rest;
        }
    }

    trimmed
}
