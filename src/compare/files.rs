//! File diff classifier: maps the host's raw changed-path report onto the
//! three-way change model within a date window.

use super::types::{ChangeType, DateWindow, FileChange};
use crate::ports::gitlab::RawDiffEntry;

/// Classify the raw diff report into [`FileChange`] entries.
///
/// Entries dated outside `window` are dropped. A rename is split into
/// Deleted(old path) + Added(new path) so the UI keeps its three-category
/// model. Undated entries (`touched_at == None`) are retained: the host
/// could not attribute them to a commit, and dropping them would hide a
/// real difference between the branches. Output is sorted by path.
#[must_use]
pub fn classify(entries: &[RawDiffEntry], window: DateWindow) -> Vec<FileChange> {
    let mut changes: Vec<FileChange> = Vec::new();

    for entry in entries {
        let in_window = entry.touched_at.map_or(!window.is_empty(), |t| window.contains(t));
        if !in_window {
            continue;
        }
        if entry.renamed_file {
            changes.push(FileChange { path: entry.old_path.clone(), change_type: ChangeType::Deleted });
            changes.push(FileChange { path: entry.new_path.clone(), change_type: ChangeType::Added });
        } else if entry.new_file {
            changes.push(FileChange { path: entry.new_path.clone(), change_type: ChangeType::Added });
        } else if entry.deleted_file {
            changes.push(FileChange { path: entry.old_path.clone(), change_type: ChangeType::Deleted });
        } else {
            changes.push(FileChange { path: entry.new_path.clone(), change_type: ChangeType::Modified });
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path).then(a.change_type.cmp(&b.change_type)));
    changes.dedup();
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn january() -> DateWindow {
        DateWindow { from: at("2024-01-01T00:00:00Z"), to: at("2024-01-31T23:59:59Z") }
    }

    fn entry(path: &str, touched: &str) -> RawDiffEntry {
        RawDiffEntry {
            old_path: path.to_string(),
            new_path: path.to_string(),
            new_file: false,
            renamed_file: false,
            deleted_file: false,
            touched_at: Some(at(touched)),
        }
    }

    #[test]
    fn indicators_map_to_the_three_way_enum_in_path_order() {
        // Report order is scrambled on purpose; output must come back sorted.
        let added = RawDiffEntry { new_file: true, ..entry("b.txt", "2024-01-10T00:00:00Z") };
        let deleted = RawDiffEntry { deleted_file: true, ..entry("c.txt", "2024-01-11T00:00:00Z") };
        let report = vec![deleted, added, entry("a.txt", "2024-01-12T00:00:00Z")];

        let changes = classify(&report, january());
        assert_eq!(
            changes,
            vec![
                FileChange { path: "a.txt".into(), change_type: ChangeType::Modified },
                FileChange { path: "b.txt".into(), change_type: ChangeType::Added },
                FileChange { path: "c.txt".into(), change_type: ChangeType::Deleted },
            ]
        );
    }

    #[test]
    fn rename_splits_into_delete_plus_add() {
        let rename = RawDiffEntry {
            old_path: "old/name.rs".to_string(),
            new_path: "new/name.rs".to_string(),
            new_file: false,
            renamed_file: true,
            deleted_file: false,
            touched_at: Some(at("2024-01-10T00:00:00Z")),
        };
        let changes = classify(&[rename], january());
        assert_eq!(
            changes,
            vec![
                FileChange { path: "new/name.rs".into(), change_type: ChangeType::Added },
                FileChange { path: "old/name.rs".into(), change_type: ChangeType::Deleted },
            ]
        );
    }

    #[test]
    fn entries_outside_the_window_are_dropped() {
        let report = vec![
            entry("kept.txt", "2024-01-15T00:00:00Z"),
            entry("too_old.txt", "2023-12-01T00:00:00Z"),
            entry("too_new.txt", "2024-03-01T00:00:00Z"),
        ];
        let changes = classify(&report, january());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "kept.txt");
    }

    #[test]
    fn undated_entries_are_retained() {
        let undated = RawDiffEntry { touched_at: None, ..entry("mystery.txt", "2024-01-01T00:00:00Z") };
        let changes = classify(&[undated], january());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "mystery.txt");
    }

    #[test]
    fn inverted_window_drops_everything_including_undated_entries() {
        let window = DateWindow { from: at("2024-02-01T00:00:00Z"), to: at("2024-01-01T00:00:00Z") };
        let undated = RawDiffEntry { touched_at: None, ..entry("a.txt", "2024-01-01T00:00:00Z") };
        let report = vec![undated, entry("b.txt", "2024-01-15T00:00:00Z")];
        assert!(classify(&report, window).is_empty());
    }

    #[test]
    fn duplicate_paths_collapse() {
        let report = vec![entry("same.txt", "2024-01-10T00:00:00Z"), entry("same.txt", "2024-01-11T00:00:00Z")];
        let changes = classify(&report, january());
        assert_eq!(changes.len(), 1);
    }
}
