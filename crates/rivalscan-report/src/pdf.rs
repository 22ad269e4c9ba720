//! PDF writer for assembled report lines.
//!
//! A4 pages, built-in Helvetica faces, top-down cursor with page breaks.
//! Built-in fonts cover only the first 256 codepoints, so text is sanitized
//! before drawing.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::error::ReportError;
use crate::layout::Line;

/// Render the line list into a single-file PDF byte stream.
pub(crate) fn render_pdf(title: &str, lines: &[Line]) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "content");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = 272.0;

    for line in lines {
        let (text, font, size, step, wrap_at): (&str, &IndirectFontRef, _, _, usize) = match line {
            Line::Blank => {
                y -= 4.0;
                continue;
            }
            Line::Title(t) => (t, &bold, 20.0, 10.0, 40),
            Line::Heading(t) => (t, &bold, 14.0, 8.0, 55),
            Line::SubHeading(t) => (t, &bold, 11.0, 6.5, 75),
            Line::Text(t) => (t, &regular, 10.0, 5.5, 95),
        };

        for chunk in wrap(text, wrap_at) {
            if y < 18.0 {
                let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "content");
                layer = doc.get_page(page).get_layer(page_layer);
                y = 272.0;
            }
            layer.use_text(sanitize(&chunk), size, Mm(20.0), Mm(y), font);
            y -= step;
        }
    }

    doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
}

/// Word-wrap `text` to at most `max_chars` per line, hard-splitting words
/// longer than a whole line (URLs, mostly).
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let push_word = |word: &str, lines: &mut Vec<String>, current: &mut String| {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(current));
            current.push_str(word);
        }
    };

    for word in text.split_whitespace() {
        if word.chars().count() <= max_chars {
            push_word(word, &mut lines, &mut current);
            continue;
        }
        // Hard-split an over-long word into line-sized pieces.
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(max_chars) {
            let piece: String = piece.iter().collect();
            push_word(&piece, &mut lines, &mut current);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Replace codepoints outside the built-in font range with `?`.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 256 { c } else { '?' })
        .collect()
}
