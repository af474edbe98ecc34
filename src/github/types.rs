//! Shared GitHub data types

/// Metadata of the merged pull request that triggered the run, passed
/// explicitly into the orchestration (never read from ambient state).
#[derive(Debug, Clone)]
pub struct SourcePullRequest {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub merge_commit_sha: String,
}

/// The follow-up pull request created at the end of a run.
#[derive(Debug, Clone)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub html_url: String,
    /// Full API payload, exposed verbatim through the `data` output.
    pub data: serde_json::Value,
}
