//! Regenerating a segment in sorted order.
//!
//! The whole region of a segment (leading modifiers, attached comments,
//! element bodies and the blank lines between them) is rebuilt as one string
//! and swapped in with a single edit. Visibility modifiers are synthesized
//! from the elements' original visibility instead of being moved around.

use crate::categorizer::Element;
use crate::comments::attached_start_line;
use crate::offense::Edit;
use crate::policy::KeyOrder;
use crate::segment::Segment;
use crate::source::SourceText;

/// Stable sort by priority, then key, then original position.
pub fn sort_elements<'e, 'a>(
    elements: &[&'e Element<'a>],
    key_order: KeyOrder,
) -> Vec<&'e Element<'a>> {
    let mut sorted = elements.to_vec();
    sorted.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| key_order.compare(&a.sort_key, &b.sort_key))
            .then_with(|| a.original_index.cmp(&b.original_index))
    });
    sorted
}

fn is_reordered(original: &[&Element<'_>], sorted: &[&Element<'_>]) -> bool {
    original
        .iter()
        .zip(sorted)
        .any(|(a, b)| a.original_index != b.original_index)
}

/// Line buffer that collapses runs of requested blank lines into one and never
/// starts with a blank line.
struct Emitter {
    lines: Vec<String>,
    pending_blank: bool,
}

impl Emitter {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            pending_blank: false,
        }
    }

    fn blank(&mut self) {
        if !self.lines.is_empty() {
            self.pending_blank = true;
        }
    }

    fn push(&mut self, line: String) {
        if std::mem::take(&mut self.pending_blank) {
            self.lines.push(String::new());
        }
        self.lines.push(line);
    }

    fn finish(self, line_ending: &str) -> String {
        self.lines.join(line_ending)
    }
}

/// Build the edit that puts `segment` in sorted order, or `None` when it is
/// already sorted or cannot be rewritten safely.
pub fn rewrite(segment: &Segment<'_, '_>, source: &SourceText, key_order: KeyOrder) -> Option<Edit> {
    let sorted = sort_elements(&segment.elements, key_order);
    if !is_reordered(&segment.elements, &sorted)
        || segment.inline
        || segment.has_verbatim_lines()
    {
        return None;
    }

    let first = segment.elements.first()?;
    let indent = source.indentation(first.statement.first_line).to_string();

    let mut out = Emitter::new();
    let mut visibility = segment.visibility_before;
    let mut previous: Option<&Element<'_>> = None;

    for element in sorted.iter().copied() {
        if element.visibility != visibility {
            out.blank();
            out.push(format!("{indent}{}", element.visibility.keyword()));
            out.blank();
            visibility = element.visibility;
        } else if let Some(previous) = previous {
            if needs_separator(previous, element) {
                out.blank();
            }
        }

        for line in element_lines(element, source, &indent) {
            out.push(line);
        }
        previous = Some(element);
    }

    let original_end = segment.visibility_after();
    if segment.followed && visibility != original_end {
        out.blank();
        out.push(format!("{indent}{}", original_end.keyword()));
    }

    Some(Edit::new(
        source.line_start(segment.start_line(source)),
        source.line_end(segment.end_line()),
        out.finish(source.line_ending()),
    ))
}

fn needs_separator(previous: &Element<'_>, next: &Element<'_>) -> bool {
    previous.category != next.category
        || (previous.statement.is_method_definition() && next.statement.is_method_definition())
}

/// Comment and body lines of `element`, moved to `indent` while keeping their
/// indentation relative to each other.
fn element_lines(element: &Element<'_>, source: &SourceText, indent: &str) -> Vec<String> {
    let first = attached_start_line(element.statement, source);
    let last = element.statement.last_line;
    let raw: Vec<&str> = (first..=last).map(|line| source.line(line)).collect();

    let own_indent = raw
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .min_by_key(|prefix| prefix.chars().count())
        .unwrap_or("");

    if own_indent == indent {
        return raw
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    line.to_string()
                }
            })
            .collect();
    }

    let base = own_indent.chars().count();
    raw.iter()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                return String::new();
            }
            let column = line[..line.len() - trimmed.len()].chars().count();
            format!("{indent}{}{trimmed}", " ".repeat(column.saturating_sub(base)))
        })
        .collect()
}
