//! Splitting a scan into independently reorderable segments.
//!
//! Only elements may move. Anything that would have to stay put relative to
//! its neighbors ends the current segment: an uncategorized statement, a
//! modifier sharing its line with something else, or a comment that is not
//! attached to the element below it.

use crate::categorizer::{Element, Entry};
use crate::comments::{attached_start_line, has_detached_comment};
use crate::source::SourceText;
use crate::statement::{Statement, Visibility};

#[derive(Debug, Clone)]
pub struct Segment<'e, 'a> {
    pub elements: Vec<&'e Element<'a>>,
    /// Bare modifiers directly above the first element, swallowed by the region
    pub leading_modifiers: Vec<&'a Statement>,
    /// Visibility in effect just before the region starts
    pub visibility_before: Visibility,
    /// Some element shares a line with code outside itself
    pub inline: bool,
    /// Statements come after the last element
    pub followed: bool,
}

impl<'e, 'a> Segment<'e, 'a> {
    /// First line of the region a rewrite replaces.
    pub fn start_line(&self, source: &SourceText) -> usize {
        match (self.leading_modifiers.first(), self.elements.first()) {
            (Some(modifier), _) => modifier.first_line,
            (None, Some(element)) => attached_start_line(element.statement, source),
            (None, None) => 0,
        }
    }

    /// Last line of the region a rewrite replaces.
    pub fn end_line(&self) -> usize {
        self.elements
            .last()
            .map(|element| element.statement.last_line)
            .unwrap_or(0)
    }

    /// Visibility in effect right after the original region.
    pub fn visibility_after(&self) -> Visibility {
        self.elements
            .last()
            .map(|element| element.visibility)
            .unwrap_or(self.visibility_before)
    }

    /// Some element holds lines that must be kept byte for byte: a heredoc
    /// body or the inside of a multi-line literal.
    pub fn has_verbatim_lines(&self) -> bool {
        self.elements.iter().any(|element| {
            element.statement.has_heredoc || element.statement.has_multiline_literal
        })
    }
}

struct Builder<'e, 'a> {
    elements: Vec<&'e Element<'a>>,
    leading_modifiers: Vec<&'a Statement>,
    visibility_before: Visibility,
}

impl<'e, 'a> Builder<'e, 'a> {
    fn finish(self, followed: bool, source: &SourceText) -> Segment<'e, 'a> {
        let inline = self
            .elements
            .iter()
            .any(|element| !owns_lines(element.statement, source));

        Segment {
            elements: self.elements,
            leading_modifiers: self.leading_modifiers,
            visibility_before: self.visibility_before,
            inline,
            followed,
        }
    }
}

/// A modifier pending between elements, with the visibility before it.
struct PendingModifier<'a> {
    statement: &'a Statement,
    visibility_before: Visibility,
}

/// Cut a scan into segments, in source order. Segments with a single element
/// are kept so callers can still see them, but nothing can be out of order
/// inside them.
pub fn segments<'e, 'a>(entries: &'e [Entry<'a>], source: &SourceText) -> Vec<Segment<'e, 'a>> {
    let mut segments = Vec::new();
    let mut current: Option<Builder<'e, 'a>> = None;
    let mut pending: Vec<PendingModifier<'a>> = Vec::new();
    let mut visibility = Visibility::Public;

    for entry in entries {
        match entry {
            Entry::Uncategorized(_) => {
                if let Some(builder) = current.take() {
                    segments.push(builder.finish(true, source));
                }
                pending.clear();
            }
            Entry::Modifier {
                statement,
                visibility: next,
            } => {
                if is_pinned(statement, source) {
                    if let Some(builder) = current.take() {
                        segments.push(builder.finish(true, source));
                    }
                    pending.clear();
                } else {
                    pending.push(PendingModifier {
                        statement,
                        visibility_before: visibility,
                    });
                }
                visibility = *next;
            }
            Entry::Element(element) => {
                let attached = attached_start_line(element.statement, source);

                let detached = current.as_ref().map(|builder| {
                    let previous_end = builder
                        .elements
                        .last()
                        .map(|last| last.statement.last_line + 1)
                        .unwrap_or(attached);
                    has_detached_comment(previous_end..attached, source)
                });

                match detached {
                    Some(false) => {
                        if let Some(builder) = current.as_mut() {
                            builder.elements.push(element);
                        }
                        pending.clear();
                        continue;
                    }
                    Some(true) => {
                        if let Some(builder) = current.take() {
                            segments.push(builder.finish(true, source));
                        }
                    }
                    None => {}
                }

                let leading = leading_modifiers(&pending, attached, source);
                let visibility_before = leading
                    .first()
                    .map(|modifier| modifier.visibility_before)
                    .unwrap_or(visibility);

                current = Some(Builder {
                    elements: vec![element],
                    leading_modifiers: leading.iter().map(|modifier| modifier.statement).collect(),
                    visibility_before,
                });
                pending.clear();
            }
        }
    }

    if let Some(builder) = current.take() {
        segments.push(builder.finish(!pending.is_empty(), source));
    }

    segments
}

/// The suffix of `pending` that can be swallowed into a region starting at
/// `boundary`: stop at the first modifier separated from the rest by a comment.
fn leading_modifiers<'p, 'a>(
    pending: &'p [PendingModifier<'a>],
    boundary: usize,
    source: &SourceText,
) -> &'p [PendingModifier<'a>] {
    let mut start = pending.len();
    let mut lower = boundary;

    for (idx, modifier) in pending.iter().enumerate().rev() {
        if has_detached_comment(modifier.statement.last_line + 1..lower, source) {
            break;
        }
        start = idx;
        lower = modifier.statement.first_line;
    }

    &pending[start..]
}

/// A modifier is pinned when its line holds anything besides the keyword, or
/// when a comment sits directly above it.
fn is_pinned(statement: &Statement, source: &SourceText) -> bool {
    let text = source.slice(statement.start_byte, statement.end_byte);
    statement.first_line != statement.last_line
        || source.line(statement.first_line).trim() != text.trim()
        || attached_start_line(statement, source) != statement.first_line
}

/// True when the statement starts its first line and nothing but a comment
/// follows it on its last line.
fn owns_lines(statement: &Statement, source: &SourceText) -> bool {
    let starts_line = statement.column == source.indentation(statement.first_line).chars().count();
    let line_end = source.line_end(statement.last_line);
    let rest = if statement.end_byte <= line_end {
        source.slice(statement.end_byte, line_end).trim()
    } else {
        ""
    };

    starts_line && (rest.is_empty() || rest.starts_with('#'))
}
