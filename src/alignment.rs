use crate::offense::Edit;
use crate::source::SourceText;
use crate::statement::{OperatorSite, Statement};

/// One statement of a group whose operator is not in the target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misalignment<'a> {
    pub statement: &'a Statement,
    /// `None` when the gap before the operator is more than plain spaces
    pub edit: Option<Edit>,
}

/// Break a group wherever a statement starts on the line the previous one
/// ends on. Operators sharing a line move together, so only runs of two or
/// more statements on distinct lines are returned.
pub fn line_runs(group: &[Statement]) -> Vec<&[Statement]> {
    group
        .chunk_by(|previous, next| next.first_line > previous.last_line)
        .filter(|run| run.len() >= 2)
        .collect()
}

/// Column every operator of the group should move to.
pub fn target_column(group: &[Statement]) -> Option<usize> {
    group
        .iter()
        .filter_map(|statement| statement.operator.map(|site| site.column))
        .max()
}

/// Check a group and compute the whitespace edits that line its operators up.
///
/// Each misaligned operator is shifted by widening or narrowing the run of
/// spaces in front of it, never below a single space.
pub fn align<'a>(group: &'a [Statement], source: &SourceText) -> Vec<Misalignment<'a>> {
    let Some(target) = target_column(group) else {
        return Vec::new();
    };

    group
        .iter()
        .filter_map(|statement| {
            let site = statement.operator?;
            (site.column != target).then(|| Misalignment {
                statement,
                edit: spacing_edit(site, target, source),
            })
        })
        .collect()
}

fn spacing_edit(site: OperatorSite, target: usize, source: &SourceText) -> Option<Edit> {
    let gap = source.slice(site.lhs_end, site.operator_start);
    if gap.chars().any(|c| c != ' ' && c != '\t') {
        return None;
    }

    let spaces = gap.chars().count();
    let wanted = (spaces + target).saturating_sub(site.column).max(1);
    Some(Edit::new(site.lhs_end, site.operator_start, " ".repeat(wanted)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RubyParser;
    use crate::statement::extract_statements;

    fn aligned(source: &str) -> String {
        let parsed = RubyParser::new().parse(source, "test.rb").unwrap();
        let statements = extract_statements(Some(parsed.root()), &parsed.source);
        let mut edits: Vec<Edit> = align(&statements, &parsed.source)
            .into_iter()
            .filter_map(|misalignment| misalignment.edit)
            .collect();
        edits.sort_by_key(|edit| std::cmp::Reverse(edit.start));

        let mut text = source.to_string();
        for edit in edits {
            text.replace_range(edit.start..edit.end, &edit.replacement);
        }
        text
    }

    #[test]
    fn test_pads_shorter_targets() {
        assert_eq!(aligned("h[\"a\"] = 1\nh[\"bb\"] = 2\n"), "h[\"a\"]  = 1\nh[\"bb\"] = 2\n");
    }

    #[test]
    fn test_pads_to_widest_operator() {
        assert_eq!(aligned("a      = 1\nbb   = 2\n"), "a      = 1\nbb     = 2\n");
    }

    #[test]
    fn test_keeps_at_least_one_space() {
        let source = SourceText::new("abc = 1\n");
        let site = OperatorSite {
            lhs_end: 3,
            operator_start: 4,
            column: 9,
        };

        let edit = spacing_edit(site, 2, &source).unwrap();
        assert_eq!(edit.replacement, " ");
        assert_eq!((edit.start, edit.end), (3, 4));
    }

    #[test]
    fn test_aligned_group_is_clean() {
        let parsed = RubyParser::new()
            .parse("a  = 1\nbb = 2\n", "test.rb")
            .unwrap();
        let statements = extract_statements(Some(parsed.root()), &parsed.source);
        assert!(align(&statements, &parsed.source).is_empty());
        assert_eq!(target_column(&statements), Some(3));
    }

    #[test]
    fn test_shared_line_splits_runs() {
        let parsed = RubyParser::new()
            .parse("a = 1; bb = 2\nccc = 3\n", "test.rb")
            .unwrap();
        let statements = extract_statements(Some(parsed.root()), &parsed.source);
        let runs = line_runs(&statements);

        assert_eq!(runs.len(), 1);
        let lines: Vec<_> = runs[0].iter().map(|statement| statement.first_line).collect();
        assert_eq!(lines, vec![0, 1]);
        assert_eq!(runs[0][0].operator.map(|site| site.column), Some(10));
        assert!(line_runs(&statements[..2]).is_empty());
    }

    #[test]
    fn test_non_whitespace_gap_is_not_fixed() {
        let parsed = RubyParser::new()
            .parse("a = 1\nbb  =  2\n", "test.rb")
            .unwrap();
        let mut statements = extract_statements(Some(parsed.root()), &parsed.source);
        if let Some(site) = statements[0].operator.as_mut() {
            site.lhs_end = 0;
        }
        let misalignments = align(&statements, &parsed.source);
        assert_eq!(misalignments.len(), 1);
        assert_eq!(misalignments[0].edit, None);
    }
}
