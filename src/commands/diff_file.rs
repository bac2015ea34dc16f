//! `glint diff-file` command.

use crate::compare::types::{DiffKind, DiffLine};
use crate::compare::CompareService;

/// Execute the `diff-file` command: print the aligned line diff of one file
/// between the two branches, with per-side line numbers and `+`/`-`
/// markers.
///
/// # Errors
///
/// Returns an error string when the diff cannot be produced (unknown path,
/// binary content, upstream failure).
pub async fn run(
    service: &CompareService,
    source: &str,
    dest: &str,
    path: &str,
    json: bool,
) -> Result<(), String> {
    let lines = service.diff_file(path, source, dest).await.map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&lines).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let number_width = number_width(&lines);
    for line in &lines {
        let marker = match line.kind {
            DiffKind::Equal => ' ',
            DiffKind::Insert => '+',
            DiffKind::Delete => '-',
        };
        let source_no = format_line_number(line.source_line);
        let dest_no = format_line_number(line.dest_line);
        println!(
            "{source_no:>number_width$} {dest_no:>number_width$} {marker} {}",
            line.text
        );
    }
    Ok(())
}

fn format_line_number(number: Option<usize>) -> String {
    number.map_or_else(String::new, |n| n.to_string())
}

fn number_width(lines: &[DiffLine]) -> usize {
    lines
        .iter()
        .flat_map(|l| [l.source_line, l.dest_line])
        .flatten()
        .max()
        .map_or(1, |n| n.to_string().len())
}
