//! Workflow event context
//!
//! Reads the `pull_request` event payload and repository slug once, up front,
//! into explicit structs. Nothing downstream touches ambient environment
//! state.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::github::types::SourcePullRequest;

#[derive(Debug, Error)]
pub enum ActionsError {
    #[error("Environment variable {name} is not set")]
    MissingEnv { name: String },
    #[error("GITHUB_REPOSITORY '{value}' is not in owner/repo form")]
    InvalidRepoSlug { value: String },
    #[error("Event payload has no pull_request entry")]
    MissingPullRequest,
    #[error("Merged pull request has no merge_commit_sha")]
    MissingMergeCommit,
    #[error("Failed to read event payload: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("Failed to parse event payload: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

/// "owner/repo" pair from `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    pub fn parse(value: &str) -> Result<Self, ActionsError> {
        match value.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(ActionsError::InvalidRepoSlug {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    title: String,
    body: Option<String>,
    merge_commit_sha: Option<String>,
    #[serde(default)]
    labels: Vec<LabelPayload>,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}

/// Everything the orchestration needs from the workflow runtime.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub repo: RepoSlug,
    pub pull_request: SourcePullRequest,
}

impl ActionContext {
    /// Build the context from `GITHUB_REPOSITORY` and `GITHUB_EVENT_PATH`.
    pub fn from_env() -> Result<Self, ActionsError> {
        let slug = require_env("GITHUB_REPOSITORY")?;
        let event_path = require_env("GITHUB_EVENT_PATH")?;

        Ok(Self {
            repo: RepoSlug::parse(&slug)?,
            pull_request: read_pull_request(Path::new(&event_path))?,
        })
    }
}

fn require_env(name: &str) -> Result<String, ActionsError> {
    std::env::var(name).map_err(|_| ActionsError::MissingEnv {
        name: name.to_string(),
    })
}

fn read_pull_request(path: &Path) -> Result<SourcePullRequest, ActionsError> {
    let raw = std::fs::read_to_string(path)?;
    let payload: EventPayload = serde_json::from_str(&raw)?;
    let pr = payload
        .pull_request
        .ok_or(ActionsError::MissingPullRequest)?;

    // The value of merge_commit_sha depends on the PR state; for a merged PR
    // it is the merge commit we cherry-pick.
    let merge_commit_sha = pr
        .merge_commit_sha
        .ok_or(ActionsError::MissingMergeCommit)?;

    Ok(SourcePullRequest {
        number: pr.number,
        title: pr.title,
        body: pr.body,
        labels: pr.labels.into_iter().map(|l| l.name).collect(),
        merge_commit_sha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_repo_slug() {
        let slug = RepoSlug::parse("octocat/hello-world").unwrap();
        assert_eq!(slug.owner, "octocat");
        assert_eq!(slug.repo, "hello-world");
    }

    #[test]
    fn rejects_bad_repo_slug() {
        assert!(RepoSlug::parse("no-slash").is_err());
        assert!(RepoSlug::parse("/repo").is_err());
        assert!(RepoSlug::parse("owner/").is_err());
    }

    #[test]
    fn reads_pull_request_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "pull_request": {{
                    "number": 42,
                    "title": "Fix the widget",
                    "body": "Widget was broken",
                    "merge_commit_sha": "abc123",
                    "labels": [{{"name": "bug"}}, {{"name": "main"}}]
                }}
            }}"#
        )
        .unwrap();

        let pr = read_pull_request(file.path()).unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.title, "Fix the widget");
        assert_eq!(pr.body.as_deref(), Some("Widget was broken"));
        assert_eq!(pr.merge_commit_sha, "abc123");
        assert_eq!(pr.labels, vec!["bug", "main"]);
    }

    #[test]
    fn missing_pull_request_entry_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"push": {{}}}}"#).unwrap();

        assert!(matches!(
            read_pull_request(file.path()).unwrap_err(),
            ActionsError::MissingPullRequest
        ));
    }

    #[test]
    fn missing_merge_commit_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pull_request": {{"number": 7, "title": "t", "labels": []}}}}"#
        )
        .unwrap();

        assert!(matches!(
            read_pull_request(file.path()).unwrap_err(),
            ActionsError::MissingMergeCommit
        ));
    }
}
