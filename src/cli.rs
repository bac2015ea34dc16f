//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `glint`.
#[derive(Debug, Parser)]
#[command(name = "glint", version, about = "Compare branches of a GitLab repository")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the repository's branches, default branch first.
    Branches {
        /// Repository URL, e.g. `https://gitlab.com/group/project`.
        #[arg(long)]
        repo_url: String,
        /// Personal access token; falls back to `GITLAB_TOKEN`.
        #[arg(long)]
        token: Option<String>,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Compare two branches: unique commits and changed files.
    Compare {
        /// Repository URL, e.g. `https://gitlab.com/group/project`.
        #[arg(long)]
        repo_url: String,
        /// Personal access token; falls back to `GITLAB_TOKEN`.
        #[arg(long)]
        token: Option<String>,
        /// Source branch (the side proposing changes).
        source: String,
        /// Destination branch (the side compared against).
        dest: String,
        /// Earliest date included, `YYYY-MM-DD` or RFC 3339.
        #[arg(long)]
        from: Option<String>,
        /// Latest date included, `YYYY-MM-DD` or RFC 3339.
        #[arg(long)]
        to: Option<String>,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show the aligned line diff of one file between two branches.
    DiffFile {
        /// Repository URL, e.g. `https://gitlab.com/group/project`.
        #[arg(long)]
        repo_url: String,
        /// Personal access token; falls back to `GITLAB_TOKEN`.
        #[arg(long)]
        token: Option<String>,
        /// Source branch (the side proposing changes).
        source: String,
        /// Destination branch (the side compared against).
        dest: String,
        /// Repository-relative file path.
        path: String,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_branches_subcommand() {
        let cli = Cli::parse_from(["glint", "branches", "--repo-url", "https://gitlab.com/g/p"]);
        assert!(matches!(cli.command, Command::Branches { .. }));
    }

    #[test]
    fn parses_compare_with_window_flags() {
        let cli = Cli::parse_from([
            "glint",
            "compare",
            "--repo-url",
            "https://gitlab.com/g/p",
            "feature",
            "main",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
        ]);
        let Command::Compare { source, dest, from, to, json, .. } = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(source, "feature");
        assert_eq!(dest, "main");
        assert_eq!(from.as_deref(), Some("2024-01-01"));
        assert_eq!(to.as_deref(), Some("2024-01-31"));
        assert!(!json);
    }

    #[test]
    fn parses_diff_file_positionals_in_order() {
        let cli = Cli::parse_from([
            "glint",
            "diff-file",
            "--repo-url",
            "https://gitlab.com/g/p",
            "feature",
            "main",
            "src/lib.rs",
            "--json",
        ]);
        let Command::DiffFile { source, dest, path, json, .. } = cli.command else {
            panic!("expected diff-file");
        };
        assert_eq!(source, "feature");
        assert_eq!(dest, "main");
        assert_eq!(path, "src/lib.rs");
        assert!(json);
    }

    #[test]
    fn compare_requires_both_branches() {
        let result =
            Cli::try_parse_from(["glint", "compare", "--repo-url", "https://gitlab.com/g/p", "only"]);
        assert!(result.is_err());
    }
}
