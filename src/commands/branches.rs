//! `glint branches` command.

use crate::compare::CompareService;

/// Execute the `branches` command: print the branch list, default branch
/// first and marked with `*`.
///
/// # Errors
///
/// Returns an error string when the branch listing fails.
pub async fn run(service: &CompareService, json: bool) -> Result<(), String> {
    let branches = service.branches().await.map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&branches).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    if branches.is_empty() {
        println!("No branches found.");
        return Ok(());
    }
    for branch in &branches {
        let marker = if branch.default { "*" } else { " " };
        println!("{marker} {}", branch.name);
    }
    Ok(())
}
