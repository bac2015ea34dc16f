//! Command dispatch and handlers.

pub mod branches;
pub mod compare;
pub mod diff_file;

use std::env;

use crate::adapters::GitLabApi;
use crate::cli::Command;
use crate::compare::CompareService;

/// Dispatch a parsed command to its handler.
///
/// Each invocation builds its own request-scoped service (REST adapter plus
/// orchestrator); nothing is shared or cached across commands.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Branches { repo_url, token, json } => {
            let service = build_service(repo_url, token.as_deref())?;
            branches::run(&service, *json).await
        }
        Command::Compare { repo_url, token, source, dest, from, to, json } => {
            let service = build_service(repo_url, token.as_deref())?;
            compare::run(&service, source, dest, from.as_deref(), to.as_deref(), *json).await
        }
        Command::DiffFile { repo_url, token, source, dest, path, json } => {
            let service = build_service(repo_url, token.as_deref())?;
            diff_file::run(&service, source, dest, path, *json).await
        }
    }
}

/// Build the service for one request. The token flag wins over the
/// `GITLAB_TOKEN` environment variable.
fn build_service(repo_url: &str, token: Option<&str>) -> Result<CompareService, String> {
    let token = token.map(str::to_string).or_else(|| env::var("GITLAB_TOKEN").ok());
    let host = GitLabApi::from_repo_url(repo_url, token).map_err(|e| e.to_string())?;
    Ok(CompareService::new(Box::new(host)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_service_rejects_a_bad_repo_url() {
        let err = build_service("not a url", None).unwrap_err();
        assert!(err.contains("invalid input"));
    }

    #[test]
    fn build_service_accepts_a_project_url() {
        assert!(build_service("https://gitlab.com/group/project", Some("tok")).is_ok());
    }
}
