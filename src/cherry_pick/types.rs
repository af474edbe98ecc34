//! Core types for the cherry-pick orchestration

use thiserror::Error;

use crate::config::{CommitIdentity, ConfigError, Inputs};
use crate::git::GitError;
use crate::github::types::SourcePullRequest;
use crate::github::GitHubError;

/// Emitted on stderr when the picked commit is empty after resolution.
pub const CHERRYPICK_EMPTY: &str =
    "The previous cherry-pick is now empty, possibly due to conflict resolution.";

/// Marker in cherry-pick stdout for an unresolved content conflict.
pub const CHERRYPICK_CONFLICT: &str = "CONFLICT(content)";

/// Everything one orchestration run needs. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct CherryPickRequest {
    pub source_commit: String,
    pub target_branch: String,
    pub new_branch: String,
    pub strategy_option: String,
    pub force_push: bool,
    pub commit_conflicts: bool,
    pub author: CommitIdentity,
    pub committer: CommitIdentity,
}

impl CherryPickRequest {
    /// Build a request from the action inputs and the source PR's merge
    /// commit. The branch name falls back to
    /// `cherry-pick-<targetBranch>-<sourceCommit>` when not overridden.
    pub fn from_inputs(inputs: &Inputs, source: &SourcePullRequest) -> Result<Self, ConfigError> {
        let author = CommitIdentity::parse(&inputs.author)?;
        let committer = CommitIdentity::parse(&inputs.committer)?;

        let new_branch = inputs.cherry_pick_branch.clone().unwrap_or_else(|| {
            format!(
                "cherry-pick-{}-{}",
                inputs.branch, source.merge_commit_sha
            )
        });

        Ok(Self {
            source_commit: source.merge_commit_sha.clone(),
            target_branch: inputs.branch.clone(),
            new_branch,
            strategy_option: inputs.strategy_option.clone(),
            force_push: inputs.force,
            commit_conflicts: inputs.commit_conflicts,
            author,
            committer,
        })
    }
}

/// Built incrementally across the run; consumed by the publisher.
#[derive(Debug, Clone)]
pub struct CherryPickOutcome {
    pub conflict: bool,
    pub conflicted_paths: Vec<String>,
    pub branch: String,
}

/// States of the orchestration, advanced strictly left to right with one
/// conditional branch after the cherry-pick attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickState {
    Init,
    CommitterConfigured,
    BranchesFetched,
    BranchCreated,
    CherryPickAttempted,
    Clean,
    ConflictHandled,
    Pushed,
    PullRequestCreated,
}

/// Tagged result of the cherry-pick attempt, matched on to pick the next
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryPickAttempt {
    Clean,
    /// Non-zero exit, but only because the pick became empty. Treated as the
    /// clean path.
    AlreadyEmpty,
    /// Content conflict, regardless of exit code.
    Conflict,
}

#[derive(Debug, Error)]
pub enum CherryPickError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Git(#[from] GitError),
    #[error("Conflicts detected but commit-conflicts is set to false")]
    ConflictPolicy,
    #[error(transparent)]
    Api(#[from] GitHubError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Inputs {
        Inputs {
            token: "t0ken".to_string(),
            committer: "GitHub <noreply@github.com>".to_string(),
            author: "Jane <jane@example.com>".to_string(),
            branch: "release-1.0".to_string(),
            title: None,
            body: None,
            labels: vec![],
            inherit_labels: false,
            assignees: vec![],
            reviewers: vec![],
            team_reviewers: vec![],
            cherry_pick_branch: None,
            strategy_option: "theirs".to_string(),
            force: false,
            commit_conflicts: false,
        }
    }

    fn source() -> SourcePullRequest {
        SourcePullRequest {
            number: 42,
            title: "Fix the widget".to_string(),
            body: None,
            labels: vec![],
            merge_commit_sha: "abc123".to_string(),
        }
    }

    #[test]
    fn derives_branch_name_from_target_and_commit() {
        let request = CherryPickRequest::from_inputs(&inputs(), &source()).unwrap();
        assert_eq!(request.new_branch, "cherry-pick-release-1.0-abc123");
    }

    #[test]
    fn branch_override_wins() {
        let mut inputs = inputs();
        inputs.cherry_pick_branch = Some("backport/widget-fix".to_string());
        let request = CherryPickRequest::from_inputs(&inputs, &source()).unwrap();
        assert_eq!(request.new_branch, "backport/widget-fix");
    }

    #[test]
    fn malformed_author_fails_construction() {
        let mut inputs = inputs();
        inputs.author = "no email here".to_string();
        let err = CherryPickRequest::from_inputs(&inputs, &source()).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedIdentity { .. }));
    }
}
