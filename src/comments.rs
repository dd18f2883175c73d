//! Leading-comment attachment.
//!
//! A comment block travels with the statement below it only when every line
//! from the comment down to the statement is itself a comment line. A single
//! blank line anywhere in between detaches the whole block.

use crate::source::SourceText;
use crate::statement::Statement;

/// First line of the comment block attached to `statement`, or the
/// statement's own first line when nothing is attached.
pub fn attached_start_line(statement: &Statement, source: &SourceText) -> usize {
    let mut line = statement.first_line;
    while line > 0 && source.is_comment_line(line - 1) {
        line -= 1;
    }
    line
}

/// True when a comment sits in `lines` without being attached to anything
/// that follows inside the range.
pub fn has_detached_comment(lines: std::ops::Range<usize>, source: &SourceText) -> bool {
    source.has_comment_in(lines)
}
