use anyhow::{bail, Result};

use crate::offense::Edit;

/// Apply every edit that does not overlap an earlier one (by start offset) and
/// return how many were applied. Skipped edits are left for the next pass.
pub fn apply_edits(text: &mut String, mut edits: Vec<Edit>) -> Result<usize> {
    if edits.is_empty() {
        return Ok(0);
    }

    edits.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut accepted: Vec<Edit> = Vec::with_capacity(edits.len());
    for edit in edits {
        if accepted.last().is_some_and(|last| last.overlaps(&edit)) {
            continue;
        }
        accepted.push(edit);
    }

    for edit in accepted.iter().rev() {
        if edit.start > edit.end
            || edit.end > text.len()
            || !text.is_char_boundary(edit.start)
            || !text.is_char_boundary(edit.end)
        {
            bail!(
                "Invalid edit range {}..{} for text length {}",
                edit.start,
                edit.end,
                text.len()
            );
        }
        text.replace_range(edit.start..edit.end, &edit.replacement);
    }

    Ok(accepted.len())
}
