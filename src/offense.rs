use std::fmt;

use crate::source::SourceText;

/// Replace the bytes `start..end` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    pub fn overlaps(&self, other: &Edit) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// 1-based line and column, as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn at(offset: usize, source: &SourceText) -> Self {
        Self {
            line: source.line_of(offset) + 1,
            column: source.column_of(offset) + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    pub cop: &'static str,
    pub message: &'static str,
    pub location: Location,
    /// Set on every offense a fix run would resolve, even when another
    /// offense of the same group carries the edit
    pub correctable: bool,
    pub edit: Option<Edit>,
}

impl Offense {
    pub fn new(cop: &'static str, message: &'static str, location: Location) -> Self {
        Self {
            cop,
            message,
            location,
            correctable: false,
            edit: None,
        }
    }

    pub fn with_edit(mut self, edit: Option<Edit>) -> Self {
        self.correctable = self.correctable || edit.is_some();
        self.edit = edit;
        self
    }

    pub fn correctable(mut self, correctable: bool) -> Self {
        self.correctable = correctable;
        self
    }
}

impl fmt::Display for Offense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.location.line, self.location.column, self.cop, self.message
        )?;
        if self.correctable {
            write!(f, " [Correctable]")?;
        }
        Ok(())
    }
}
