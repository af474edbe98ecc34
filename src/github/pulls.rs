//! Pull request publishing
//!
//! Builds the follow-up PR's title and body from templates and the source
//! PR's metadata, creates the PR, then applies labels, assignees, and
//! reviewer requests. Assembly of title/body/labels is pure and tested in
//! isolation; only `PullRequestHandler` talks to the API.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::json;
use tracing::{info, warn};

use super::errors::{is_review_from_author, GitHubError, ERROR_PR_REVIEW_FROM_AUTHOR};
use super::types::{CreatedPullRequest, SourcePullRequest};
use crate::config::Inputs;

/// Prepended to the PR title when the cherry-pick had conflicts.
pub const CONFLICT_TITLE_PREFIX: &str = "CONFLICT!!!! ";

/// Prepended to the PR body when the cherry-pick had conflicts.
pub const CONFLICTS_DETECTED_WARNING: &str = "## Cherry pick conflicts detected - please resolve conflicts and remove this line (cherrypick-conflict).\n\n";

/// Placeholder in a title template, replaced by the source PR's title.
pub const OLD_TITLE_PLACEHOLDER: &str = "{old_title}";

/// Placeholder in a body template, replaced by the source PR's number.
pub const OLD_PR_ID_PLACEHOLDER: &str = "{old_pull_request_id}";

/// Publisher seam between the orchestrator and the API. The orchestrator only
/// knows the head branch and whether the pick conflicted.
#[async_trait]
pub trait PullRequestPublisher: Send + Sync {
    async fn publish(
        &self,
        head_branch: &str,
        conflict: bool,
    ) -> Result<CreatedPullRequest, GitHubError>;
}

/// PR creation settings distilled from the action inputs.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub base_branch: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub inherit_labels: bool,
    pub assignees: Vec<String>,
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,
}

impl PublishOptions {
    pub fn from_inputs(inputs: &Inputs) -> Self {
        Self {
            base_branch: inputs.branch.clone(),
            title: inputs.title.clone(),
            body: inputs.body.clone(),
            labels: inputs.labels.clone(),
            inherit_labels: inputs.inherit_labels,
            assignees: inputs.assignees.clone(),
            reviewers: inputs.reviewers.clone(),
            team_reviewers: inputs.team_reviewers.clone(),
        }
    }
}

/// Title: the template with `{old_title}` substituted, or the source PR's
/// title when no template was given. The conflict prefix applies either way.
pub fn build_title(template: Option<&str>, source: &SourcePullRequest, conflict: bool) -> String {
    let title = match template {
        Some(t) => t.replace(OLD_TITLE_PLACEHOLDER, &source.title),
        None => source.title.clone(),
    };

    if conflict {
        format!("{CONFLICT_TITLE_PREFIX}{title}")
    } else {
        title
    }
}

/// Body: the template with `{old_pull_request_id}` substituted, or the source
/// PR's body. The conflict banner applies either way, even to an absent body.
pub fn build_body(
    template: Option<&str>,
    source: &SourcePullRequest,
    conflict: bool,
) -> Option<String> {
    let body = match template {
        Some(t) => Some(t.replace(OLD_PR_ID_PLACEHOLDER, &source.number.to_string())),
        None => source.body.clone(),
    };

    if conflict {
        Some(format!(
            "{CONFLICTS_DETECTED_WARNING}{}",
            body.unwrap_or_default()
        ))
    } else {
        body
    }
}

/// Explicit labels plus, when inheriting, every source-PR label except one
/// equal to the target branch name. Duplicates are not suppressed.
pub fn collect_labels(
    explicit: &[String],
    inherit: bool,
    source_labels: &[String],
    target_branch: &str,
) -> Vec<String> {
    let mut labels = explicit.to_vec();
    if inherit {
        for label in source_labels {
            if label != target_branch {
                labels.push(label.clone());
            }
        }
    }
    labels
}

/// Real publisher backed by octocrab.
pub struct PullRequestHandler {
    octocrab: Octocrab,
    owner: String,
    repo: String,
    options: PublishOptions,
    source: SourcePullRequest,
}

impl PullRequestHandler {
    pub fn new(
        octocrab: Octocrab,
        owner: String,
        repo: String,
        options: PublishOptions,
        source: SourcePullRequest,
    ) -> Self {
        Self {
            octocrab,
            owner,
            repo,
            options,
            source,
        }
    }

    async fn request_reviewers(&self, pr_number: u64) -> Result<(), octocrab::Error> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            self.owner, self.repo, pr_number
        );

        if !self.options.reviewers.is_empty() {
            info!(reviewers = ?self.options.reviewers, "Requesting reviewers");
            let _: serde_json::Value = self
                .octocrab
                .post(&route, Some(&json!({ "reviewers": self.options.reviewers })))
                .await?;
        }

        if !self.options.team_reviewers.is_empty() {
            info!(team_reviewers = ?self.options.team_reviewers, "Requesting team reviewers");
            let _: serde_json::Value = self
                .octocrab
                .post(
                    &route,
                    Some(&json!({ "team_reviewers": self.options.team_reviewers })),
                )
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl PullRequestPublisher for PullRequestHandler {
    async fn publish(
        &self,
        head_branch: &str,
        conflict: bool,
    ) -> Result<CreatedPullRequest, GitHubError> {
        let title = build_title(self.options.title.as_deref(), &self.source, conflict);
        let body = build_body(self.options.body.as_deref(), &self.source, conflict);
        info!(title = %title, head = head_branch, base = %self.options.base_branch, "Opening pull request");

        let pulls = self.octocrab.pulls(&self.owner, &self.repo);
        let mut create = pulls.create(&title, head_branch, &self.options.base_branch);
        if let Some(body) = &body {
            create = create.body(body.as_str());
        }
        let pull = create.send().await?;

        let number = pull.number;
        let html_url = pull
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(number, url = %html_url, "Created pull request");

        let labels = collect_labels(
            &self.options.labels,
            self.options.inherit_labels,
            &self.source.labels,
            &self.options.base_branch,
        );
        if !labels.is_empty() {
            info!(?labels, "Applying labels");
            self.octocrab
                .issues(&self.owner, &self.repo)
                .add_labels(number, &labels)
                .await?;
        }

        if !self.options.assignees.is_empty() {
            info!(assignees = ?self.options.assignees, "Applying assignees");
            let assignees: Vec<&str> = self.options.assignees.iter().map(String::as_str).collect();
            self.octocrab
                .issues(&self.owner, &self.repo)
                .add_assignees(number, &assignees)
                .await?;
        }

        if let Err(e) = self.request_reviewers(number).await {
            if is_review_from_author(&e) {
                warn!("{ERROR_PR_REVIEW_FROM_AUTHOR}");
            } else {
                return Err(e.into());
            }
        }

        let data = serde_json::to_value(&pull)?;
        Ok(CreatedPullRequest {
            number,
            html_url,
            data,
        })
    }
}
