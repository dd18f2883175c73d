use tracing::trace;

use super::{Cop, CopContext};
use crate::categorizer::{elements, scan, Element};
use crate::detector::find_violations;
use crate::grouper::group_statements;
use crate::offense::{Location, Offense};
use crate::policy::{ClassPolicy, IncludePolicy, ModelPolicy, OrderingPolicy};
use crate::rewriter::rewrite;
use crate::scope::{Scope, ScopeKind};
use crate::segment::segments;
use crate::source::SourceText;
use crate::statement::Statement;

/// Report every out-of-place element of `statements` under `policy`.
///
/// The first violation of each segment carries the edit that sorts the
/// whole segment; the others are marked correctable because the same edit
/// resolves them.
pub fn check_order(
    statements: &[Statement],
    policy: &dyn OrderingPolicy,
    cop: &'static str,
    source: &SourceText,
) -> Vec<Offense> {
    let entries = scan(statements, policy);
    if elements(&entries).len() < 2 {
        return Vec::new();
    }

    let mut offenses = Vec::new();
    for segment in segments(&entries, source) {
        let violations = find_violations(&segment.elements, policy.key_order());
        if violations.is_empty() {
            continue;
        }

        let edit = rewrite(&segment, source, policy.key_order());
        trace!(
            cop,
            violations = violations.len(),
            correctable = edit.is_some(),
            "segment out of order"
        );

        let correctable = edit.is_some();
        let mut edit = edit;
        for violation in violations {
            offenses.push(
                offense_at(cop, policy.message(), violation, source)
                    .with_edit(edit.take())
                    .correctable(correctable),
            );
        }
    }

    offenses
}

fn offense_at(cop: &'static str, message: &'static str, element: &Element<'_>, source: &SourceText) -> Offense {
    Offense::new(cop, message, Location::at(element.statement.start_byte, source))
}

pub struct ModelElementOrder;

impl Cop for ModelElementOrder {
    fn name(&self) -> &'static str {
        "Layout/ModelElementOrder"
    }

    fn check(&self, scope: &Scope, ctx: &CopContext<'_>) -> Vec<Offense> {
        if !ctx.config.is_model(scope, ctx.path) {
            return Vec::new();
        }
        check_order(&scope.statements, &ModelPolicy, self.name(), ctx.source)
    }
}

pub struct ClassElementOrder;

impl Cop for ClassElementOrder {
    fn name(&self) -> &'static str {
        "Layout/ClassElementOrder"
    }

    fn check(&self, scope: &Scope, ctx: &CopContext<'_>) -> Vec<Offense> {
        if !scope.is_class_like() || ctx.config.is_model(scope, ctx.path) {
            return Vec::new();
        }
        check_order(&scope.statements, &ClassPolicy, self.name(), ctx.source)
    }
}

/// Alphabetical `include` runs, in any body.
pub struct OrderedIncludes;

impl Cop for OrderedIncludes {
    fn name(&self) -> &'static str {
        "Layout/OrderedIncludes"
    }

    fn check(&self, scope: &Scope, ctx: &CopContext<'_>) -> Vec<Offense> {
        if scope.kind == ScopeKind::Method {
            return Vec::new();
        }

        group_statements(&scope.statements, |statement| {
            IncludePolicy::is_include(&statement.shape)
        })
        .into_iter()
        .flat_map(|group| check_order(group, &IncludePolicy, self.name(), ctx.source))
        .collect()
    }
}
