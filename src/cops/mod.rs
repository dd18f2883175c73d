//! The rules themselves. Every cop is a thin configuration of the shared
//! ordering or alignment machinery.

pub mod alignment;
pub mod ordering;

use std::path::Path;

use crate::config::Config;
use crate::offense::Offense;
use crate::scope::Scope;
use crate::source::SourceText;

pub use alignment::AlignmentCop;
pub use ordering::{ClassElementOrder, ModelElementOrder, OrderedIncludes};

/// What a cop can see besides the scope it is checking.
pub struct CopContext<'a> {
    pub source: &'a SourceText,
    pub path: &'a Path,
    pub config: &'a Config,
}

pub trait Cop: Send + Sync {
    /// Department-qualified name, e.g. `Layout/ConstantAlignment`.
    fn name(&self) -> &'static str;

    fn check(&self, scope: &Scope, ctx: &CopContext<'_>) -> Vec<Offense>;
}

/// Every cop shipped with the crate.
pub fn all() -> Vec<Box<dyn Cop>> {
    vec![
        Box::new(ModelElementOrder),
        Box::new(ClassElementOrder),
        Box::new(OrderedIncludes),
        Box::new(AlignmentCop::assignments()),
        Box::new(AlignmentCop::constants()),
        Box::new(AlignmentCop::indexed_assignments()),
        Box::new(AlignmentCop::instance_variables()),
        Box::new(AlignmentCop::let_braces()),
    ]
}

/// The cops `config` enables.
pub fn registry(config: &Config) -> Vec<Box<dyn Cop>> {
    all()
        .into_iter()
        .filter(|cop| config.is_enabled(cop.name()))
        .collect()
}
