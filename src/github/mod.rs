//! GitHub API integration

pub mod client;
pub mod errors;
pub mod pulls;
pub mod types;

pub use client::build_client;
pub use errors::GitHubError;
pub use pulls::{PublishOptions, PullRequestHandler, PullRequestPublisher};
pub use types::{CreatedPullRequest, SourcePullRequest};
