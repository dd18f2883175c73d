use std::path::Path;

use anyhow::{Context, Result};
use glob::Pattern;

use crate::scope::{Scope, ScopeKind};

pub const DEFAULT_MODEL_PATH: &str = "**/app/models/**/*.rb";
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Settings shared by every cop of a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// When non-empty, only these cops (or departments) run
    pub only: Vec<String>,
    pub except: Vec<String>,
    pub model_paths: Vec<Pattern>,
    pub model_superclasses: Vec<String>,
    pub max_passes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            only: Vec::new(),
            except: Vec::new(),
            model_paths: Pattern::new(DEFAULT_MODEL_PATH).into_iter().collect(),
            model_superclasses: vec![
                "ApplicationRecord".to_string(),
                "ActiveRecord::Base".to_string(),
            ],
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl Config {
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    pub fn with_except(mut self, except: Vec<String>) -> Self {
        self.except = except;
        self
    }

    /// Replace the model path globs. An empty list keeps the defaults.
    pub fn with_model_paths(mut self, patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(self);
        }

        self.model_paths = patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid model path pattern: {pattern}"))
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Whether the cop named `name` (e.g. `Layout/ConstantAlignment`) runs.
    pub fn is_enabled(&self, name: &str) -> bool {
        let selected = |filter: &String| {
            name == filter.as_str()
                || name
                    .split_once('/')
                    .is_some_and(|(department, _)| department == filter.as_str())
        };

        (self.only.is_empty() || self.only.iter().any(selected))
            && !self.except.iter().any(selected)
    }

    /// A class is a model when it inherits from a record base class or lives
    /// under a model path.
    pub fn is_model(&self, scope: &Scope, path: &Path) -> bool {
        if scope.kind != ScopeKind::Class {
            return false;
        }

        let by_superclass = scope.superclass.as_deref().is_some_and(|superclass| {
            self.model_superclasses
                .iter()
                .any(|candidate| superclass.trim_start_matches("::") == candidate)
        });

        by_superclass
            || self
                .model_paths
                .iter()
                .any(|pattern| pattern.matches_path(path))
    }
}
