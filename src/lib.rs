pub mod alignment;
pub mod categorizer;
pub mod comments;
pub mod config;
pub mod cops;
pub mod corrector;
pub mod detector;
pub mod engine;
pub mod file_handler;
pub mod grouper;
pub mod offense;
pub mod parser;
pub mod policy;
pub mod rewriter;
pub mod scope;
pub mod segment;
pub mod source;
pub mod statement;

use anyhow::{Context, Result};
use std::path::Path;

use engine::Linter;
use offense::Offense;

/// Lint Ruby source with the default configuration.
///
/// `filename` decides whether path-based model detection applies.
pub fn lint_ruby(source: &str, filename: &str) -> Result<Vec<Offense>> {
    Linter::default().lint(source, Path::new(filename))
}

/// Autocorrect Ruby source with the default configuration and return the
/// corrected text.
pub fn fix_ruby(source: &str, filename: &str) -> Result<String> {
    let outcome = Linter::default()
        .fix(source, Path::new(filename))
        .with_context(|| format!("Failed to fix {filename}"))?;
    Ok(outcome.source)
}
