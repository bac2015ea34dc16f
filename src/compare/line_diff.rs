//! Line diff engine: aligns two text blobs into a single ordered sequence
//! of Equal/Insert/Delete lines for side-by-side rendering.

use similar::{ChangeTag, TextDiff};

use super::types::{DiffKind, DiffLine};

/// Compute the aligned line diff between `source` and `dest`.
///
/// The alignment is a deterministic Myers edit script over whole lines, so
/// identical inputs always produce the same sequence. Equal lines carry
/// both 1-based line numbers, deletes only the source number, inserts only
/// the destination number. Line text is emitted with its line ending
/// stripped. Replaying the sequence reconstructs either input: the Equal +
/// Insert lines are exactly `dest`, the Equal + Delete lines exactly
/// `source`.
#[must_use]
pub fn diff_lines(source: &str, dest: &str) -> Vec<DiffLine> {
    let diff = TextDiff::from_lines(source, dest);
    diff.iter_all_changes()
        .map(|change| DiffLine {
            kind: match change.tag() {
                ChangeTag::Equal => DiffKind::Equal,
                ChangeTag::Delete => DiffKind::Delete,
                ChangeTag::Insert => DiffKind::Insert,
            },
            source_line: change.old_index().map(|i| i + 1),
            dest_line: change.new_index().map(|i| i + 1),
            text: strip_line_ending(change.value()).to_string(),
        })
        .collect()
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
