use similar::{Algorithm, ChangeTag, TextDiff};

use crate::application::dto::diff::{DiffLine, DiffOp, TextDiffResult};

/// Line diff of `old` (side A) against `new` (side B).
///
/// Lines are split with `str::lines`, so a trailing newline and `\r\n`
/// endings do not produce spurious changes. Myers without a deadline keeps
/// the output identical for identical inputs.
pub fn compute_text_diff(old: &str, new: &str) -> TextDiffResult {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old_lines, &new_lines);

    let mut result = TextDiffResult::default();
    for op in diff.ops() {
        for change in diff.iter_changes(op) {
            let line_number_a = change.old_index().map(line_number);
            let line_number_b = change.new_index().map(line_number);
            let kind = match change.tag() {
                ChangeTag::Delete => {
                    result.removed += 1;
                    DiffOp::Removed
                }
                ChangeTag::Insert => {
                    result.added += 1;
                    DiffOp::Added
                }
                ChangeTag::Equal => DiffOp::Unchanged,
            };
            result.lines.push(DiffLine {
                op: kind,
                line_number_a,
                line_number_b,
                text: change.value().to_string(),
            });
        }
    }
    result
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
