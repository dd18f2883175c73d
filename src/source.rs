use std::collections::BTreeSet;

/// The text of one Ruby file plus the line bookkeeping every cop needs.
///
/// Lines are 0-based. Columns are counted in characters, not bytes, so that
/// alignment stays correct for non-ASCII keys.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
    /// Lines holding nothing but a comment (leading whitespace allowed)
    comment_lines: BTreeSet<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(idx, _)| idx + 1),
        );

        Self {
            text,
            line_starts,
            comment_lines: BTreeSet::new(),
        }
    }

    /// Record which lines are own-line comments. The parser fills this in from
    /// the comment nodes it finds.
    pub fn with_comment_lines(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.comment_lines.extend(lines);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Byte offset of the end of `line`, excluding the line terminator.
    pub fn line_end(&self, line: usize) -> usize {
        let start = self.line_start(line);
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());

        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    pub fn line(&self, line: usize) -> &str {
        &self.text[self.line_start(line)..self.line_end(line)]
    }

    /// Line containing the byte at `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    /// Character column of the byte at `offset`.
    pub fn column_of(&self, offset: usize) -> usize {
        let start = self.line_start(self.line_of(offset));
        self.text[start..offset.min(self.text.len())].chars().count()
    }

    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[start..end]
    }

    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).trim().is_empty()
    }

    pub fn is_comment_line(&self, line: usize) -> bool {
        self.comment_lines.contains(&line)
    }

    /// True when any line in `lines` is an own-line comment.
    pub fn has_comment_in(&self, lines: std::ops::Range<usize>) -> bool {
        lines.start < lines.end && self.comment_lines.range(lines).next().is_some()
    }

    /// Leading whitespace of `line`.
    pub fn indentation(&self, line: usize) -> &str {
        let text = self.line(line);
        &text[..text.len() - text.trim_start().len()]
    }

    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}
