use tracing::trace;

use super::{Cop, CopContext};
use crate::alignment::{align, line_runs};
use crate::grouper::group_statements;
use crate::offense::{Location, Offense};
use crate::scope::Scope;
use crate::statement::{AssignTarget, BlockKind, Statement, StatementShape};

/// Aligns the operator of consecutive statements picked by `is_candidate`.
pub struct AlignmentCop {
    name: &'static str,
    message: &'static str,
    is_candidate: fn(&Statement) -> bool,
}

impl AlignmentCop {
    pub fn assignments() -> Self {
        Self {
            name: "Layout/AssignmentAlignment",
            message: "Align the `=` operators of consecutive assignments.",
            is_candidate: |statement| {
                assigns(statement, AssignTarget::LocalVariable)
            },
        }
    }

    pub fn constants() -> Self {
        Self {
            name: "Layout/ConstantAlignment",
            message: "Align the `=` operators of consecutive constant assignments.",
            is_candidate: |statement| {
                matches!(statement.shape, StatementShape::ConstantAssign { .. })
            },
        }
    }

    pub fn indexed_assignments() -> Self {
        Self {
            name: "Layout/IndexedAssignmentAlignment",
            message: "Align the `=` operators of consecutive indexed assignments.",
            is_candidate: |statement| assigns(statement, AssignTarget::Index),
        }
    }

    pub fn instance_variables() -> Self {
        Self {
            name: "Layout/InstanceVariableAlignment",
            message: "Align the `=` operators of consecutive instance variable assignments.",
            is_candidate: |statement| {
                assigns(statement, AssignTarget::InstanceVariable)
            },
        }
    }

    pub fn let_braces() -> Self {
        Self {
            name: "RSpec/LetBraceAlignment",
            message: "Align the `{` braces of consecutive `let` definitions.",
            is_candidate: is_brace_let,
        }
    }
}

fn assigns(statement: &Statement, target: AssignTarget) -> bool {
    statement.operator.is_some()
        && matches!(statement.shape, StatementShape::Assignment { target: found } if found == target)
}

fn is_brace_let(statement: &Statement) -> bool {
    statement.operator.is_some()
        && statement.call().is_some_and(|call| {
            call.is_receiverless()
                && matches!(call.method.as_str(), "let" | "let!")
                && call.block == Some(BlockKind::Brace)
        })
}

impl Cop for AlignmentCop {
    fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, scope: &Scope, ctx: &CopContext<'_>) -> Vec<Offense> {
        let mut offenses = Vec::new();

        let groups = group_statements(&scope.statements, self.is_candidate);
        for run in groups.into_iter().flat_map(line_runs) {
            let misalignments = align(run, ctx.source);
            if !misalignments.is_empty() {
                trace!(cop = self.name, count = misalignments.len(), "misaligned group");
            }

            for misalignment in misalignments {
                offenses.push(
                    Offense::new(
                        self.name,
                        self.message,
                        Location::at(misalignment.statement.start_byte, ctx.source),
                    )
                    .with_edit(misalignment.edit),
                );
            }
        }

        offenses
    }
}
