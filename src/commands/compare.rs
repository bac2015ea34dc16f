//! `glint compare` command.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::compare::types::{ChangeType, Commit, DateWindow};
use crate::compare::CompareService;

/// Execute the `compare` command: unique commits per side within the date
/// window, plus the changed files between the branches.
///
/// When the changed-file report was unavailable (degraded result), a
/// warning goes to stderr and the commit sections are still printed.
///
/// # Errors
///
/// Returns an error string for unparsable dates or a failed comparison.
pub async fn run(
    service: &CompareService,
    source: &str,
    dest: &str,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let window = parse_window(from, to)?;
    let result = service.compare(source, dest, window).await.map_err(|e| e.to_string())?;

    if result.file_changes_unavailable {
        eprintln!("warning: changed-file report unavailable; showing commits only");
    }

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    render_commits(&format!("Only on {source}:"), &result.source_only_commits);
    render_commits(&format!("Only on {dest}:"), &result.dest_only_commits);

    println!("Changed files:");
    if result.file_changes.is_empty() {
        println!("  (none)");
    }
    for change in &result.file_changes {
        let tag = match change.change_type {
            ChangeType::Added => "A",
            ChangeType::Modified => "M",
            ChangeType::Deleted => "D",
        };
        println!("  {tag}  {}", change.path);
    }
    Ok(())
}

fn render_commits(heading: &str, commits: &[Commit]) {
    println!("{heading}");
    if commits.is_empty() {
        println!("  (none)");
        return;
    }
    let author_width = commits.iter().map(|c| c.author.len()).max().unwrap_or(6).max(6);
    for commit in commits {
        let hash = commit.hash.get(..8).unwrap_or(&commit.hash);
        println!(
            "  {hash:<8}  {}  {:<author_width$}  {}",
            commit.date.format("%Y-%m-%d %H:%M"),
            commit.author,
            commit.message,
        );
    }
}

/// Build the inclusive window from the optional CLI date flags. Absent
/// bounds leave that side of the window open.
fn parse_window(from: Option<&str>, to: Option<&str>) -> Result<DateWindow, String> {
    let mut window = DateWindow::unbounded();
    if let Some(raw) = from {
        window.from = parse_instant(raw, false)?;
    }
    if let Some(raw) = to {
        window.to = parse_instant(raw, true)?;
    }
    Ok(window)
}

/// Accept RFC 3339 or a bare date; a bare date expands to the start or end
/// of that day so the window stays inclusive on both bounds.
fn parse_instant(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw}': expected YYYY-MM-DD or RFC 3339"))?;
    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).expect("valid end-of-day time")
    } else {
        NaiveTime::MIN
    };
    Ok(date.and_time(time).and_utc())
}
