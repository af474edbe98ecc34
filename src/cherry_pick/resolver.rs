//! Conflict detection and resolution bookkeeping
//!
//! Detection and path parsing are pure; `commit_conflicts` is the one
//! effectful entry point, performing exactly one staging operation and one
//! commit. Conflict markers stay in the file content; this registers the
//! paths as resolved from git's perspective, nothing more.

use tracing::info;

use crate::external::CommandOutput;
use crate::git::GitRunner;

use super::types::{CherryPickAttempt, CherryPickError, CHERRYPICK_CONFLICT, CHERRYPICK_EMPTY};
use crate::git::GitError;

/// Classify the cherry-pick attempt. A content-conflict marker in stdout wins
/// regardless of exit code; a non-zero exit is only tolerated for the
/// already-empty case; anything else is fatal with the raw stderr.
pub fn classify_attempt(output: &CommandOutput) -> Result<CherryPickAttempt, CherryPickError> {
    if output.stdout.contains(CHERRYPICK_CONFLICT) {
        return Ok(CherryPickAttempt::Conflict);
    }

    if output.exit_code != 0 {
        if output.stderr.contains(CHERRYPICK_EMPTY) {
            return Ok(CherryPickAttempt::AlreadyEmpty);
        }
        return Err(GitError::CommandFailed {
            args: "cherry-pick".to_string(),
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }

    Ok(CherryPickAttempt::Clean)
}

/// Parse the `diff --name-only --diff-filter=U` listing. Order is preserved
/// exactly as git reports it.
pub fn conflicted_paths(stdout: &str) -> Vec<String> {
    stdout
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Enumerate conflicted paths, stage them all in one `add`, and record one
/// commit referencing the source commit. An empty listing despite the
/// conflict marker is logged and skipped, not fatal.
pub async fn commit_conflicts(
    git: &GitRunner,
    source_commit: &str,
) -> Result<Vec<String>, CherryPickError> {
    let listing = git.run(&["diff", "--name-only", "--diff-filter=U"]).await?;
    let paths = conflicted_paths(&listing.stdout);

    if paths.is_empty() {
        info!("Conflict marker reported but no unmerged paths listed; skipping commit");
        return Ok(paths);
    }

    info!(
        count = paths.len(),
        files = %paths.join(", "),
        "Found files with conflicts"
    );

    let mut add_args = vec!["add"];
    add_args.extend(paths.iter().map(String::as_str));
    git.run(&add_args).await?;

    let message = format!("Resolved conflicts in cherry-pick of {source_commit}");
    git.run(&["commit", "-m", &message]).await?;
    info!("Committed resolved conflicts");

    Ok(paths)
}
