use crate::statement::Statement;

/// Split `statements` into maximal runs of candidates that touch each other.
///
/// A candidate joins the open run when it starts at most one line after the
/// previous member ends. A candidate further away starts a new run, and a
/// non-candidate closes the run without joining it. Runs of one statement
/// are dropped. Because any non-candidate ends a run, every group is a
/// contiguous sub-slice of the input.
pub fn group_statements<F>(statements: &[Statement], is_candidate: F) -> Vec<&[Statement]>
where
    F: Fn(&Statement) -> bool,
{
    let mut groups = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, statement) in statements.iter().enumerate() {
        if !is_candidate(statement) {
            close_run(statements, &mut run_start, idx, &mut groups);
            continue;
        }

        match run_start {
            Some(_) if statement.first_line <= statements[idx - 1].last_line + 1 => {}
            Some(_) => {
                close_run(statements, &mut run_start, idx, &mut groups);
                run_start = Some(idx);
            }
            None => run_start = Some(idx),
        }
    }

    close_run(statements, &mut run_start, statements.len(), &mut groups);
    groups
}

fn close_run<'a>(
    statements: &'a [Statement],
    run_start: &mut Option<usize>,
    end: usize,
    groups: &mut Vec<&'a [Statement]>,
) {
    if let Some(start) = run_start.take() {
        if end - start >= 2 {
            groups.push(&statements[start..end]);
        }
    }
}
