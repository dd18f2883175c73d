use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, trace};

use crate::config::Config;
use crate::cops::{registry, Cop, CopContext};
use crate::corrector::apply_edits;
use crate::offense::{Edit, Offense};
use crate::parser::RubyParser;
use crate::scope::collect_scopes;

/// Result of autocorrecting one file.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub source: String,
    pub edits_applied: usize,
    pub passes: usize,
    /// Offenses still present in `source`, none of them correctable
    pub remaining: Vec<Offense>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.edits_applied > 0
    }
}

/// Runs the enabled cops over every scope of a file.
pub struct Linter {
    config: Config,
    cops: Vec<Box<dyn Cop>>,
    parser: RubyParser,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Linter {
    pub fn new(config: Config) -> Self {
        let cops = registry(&config);
        Self {
            config,
            cops,
            parser: RubyParser::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cop_names(&self) -> Vec<&'static str> {
        self.cops.iter().map(|cop| cop.name()).collect()
    }

    /// All offenses in `source`, ordered by position.
    pub fn lint(&self, source: &str, path: &Path) -> Result<Vec<Offense>> {
        let parsed = self.parser.parse(source, &path.display().to_string())?;
        let scopes = collect_scopes(&parsed);
        let ctx = CopContext {
            source: &parsed.source,
            path,
            config: &self.config,
        };

        let mut offenses = Vec::new();
        for scope in &scopes {
            for cop in &self.cops {
                let found = cop.check(scope, &ctx);
                if !found.is_empty() {
                    trace!(
                        cop = cop.name(),
                        scope = scope.name.as_deref().unwrap_or("-"),
                        count = found.len(),
                        "offenses in scope"
                    );
                }
                offenses.extend(found);
            }
        }

        offenses.sort_by(|a, b| a.location.cmp(&b.location).then(a.cop.cmp(b.cop)));
        debug!(
            path = %path.display(),
            scopes = scopes.len(),
            offenses = offenses.len(),
            "linted"
        );
        Ok(offenses)
    }

    /// Apply corrections until none are left.
    ///
    /// Each pass lints the current text and applies every edit that does not
    /// overlap another. Edits skipped for overlapping are recomputed on the
    /// next pass against the updated text.
    pub fn fix(&self, source: &str, path: &Path) -> Result<FixOutcome> {
        let mut text = source.to_string();
        let mut edits_applied = 0;

        for pass in 1..=self.config.max_passes {
            let offenses = self
                .lint(&text, path)
                .with_context(|| format!("Pass {pass} over {}", path.display()))?;
            let edits: Vec<Edit> = offenses
                .iter()
                .filter_map(|offense| offense.edit.clone())
                .collect();

            if edits.is_empty() {
                return Ok(FixOutcome {
                    source: text,
                    edits_applied,
                    passes: pass,
                    remaining: offenses,
                });
            }

            let applied = apply_edits(&mut text, edits)?;
            debug!(path = %path.display(), pass, applied, "applied corrections");
            edits_applied += applied;
        }

        bail!(
            "Corrections for {} did not settle after {} passes",
            path.display(),
            self.config.max_passes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_file() {
        let linter = Linter::default();
        let offenses = linter
            .lint("class Widget\n  SIZE = 1\nend\n", Path::new("widget.rb"))
            .unwrap();
        assert!(offenses.is_empty());
    }

    #[test]
    fn test_offenses_are_sorted() {
        let source = "class Widget\n  def run\n  end\n  SIZE = 1\nend\n\na = 1\nbb = 2\n";
        let offenses = Linter::default().lint(source, Path::new("widget.rb")).unwrap();

        let lines: Vec<_> = offenses.iter().map(|offense| offense.location.line).collect();
        assert_eq!(lines, vec![4, 7]);
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let error = Linter::default()
            .lint("class Broken\n  def x(\nend\n", Path::new("broken.rb"))
            .unwrap_err();
        assert!(error.to_string().contains("broken.rb"));
    }

    #[test]
    fn test_fix_reaches_fixed_point() {
        let source = "class Limits\n  def max\n  end\n  MIN = 1\n  MAXIMUM = 10\nend\n";
        let linter = Linter::default();
        let outcome = linter.fix(source, Path::new("limits.rb")).unwrap();

        assert_eq!(
            outcome.source,
            "class Limits\n  MIN     = 1\n  MAXIMUM = 10\n\n  def max\n  end\nend\n"
        );
        assert!(outcome.changed());
        assert!(outcome.remaining.is_empty());
        assert!(linter
            .lint(&outcome.source, Path::new("limits.rb"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_fix_on_clean_source_is_noop() {
        let source = "x = 1\n";
        let outcome = Linter::default().fix(source, Path::new("x.rb")).unwrap();

        assert_eq!(outcome.source, source);
        assert_eq!(outcome.passes, 1);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_disabled_cops_do_not_run() {
        let config = Config::default().with_except(vec!["Layout/AssignmentAlignment".to_string()]);
        let linter = Linter::new(config);

        assert!(!linter.cop_names().contains(&"Layout/AssignmentAlignment"));
        assert!(linter
            .lint("a = 1\nbb = 2\n", Path::new("x.rb"))
            .unwrap()
            .is_empty());
    }
}
