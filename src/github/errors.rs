//! GitHub API error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {source}")]
    Api {
        #[from]
        source: octocrab::Error,
    },
    #[error("Failed to serialize pull request payload: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// GitHub rejects reviewer requests naming the PR author with this message.
pub const ERROR_PR_REVIEW_FROM_AUTHOR: &str =
    "Review cannot be requested from pull request author";

/// True when the API error is the author-as-reviewer rejection, which is
/// recovered with a warning instead of failing the run.
pub fn is_review_from_author(err: &octocrab::Error) -> bool {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            source.message.contains(ERROR_PR_REVIEW_FROM_AUTHOR)
        }
        _ => false,
    }
}
