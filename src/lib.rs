// Cherry Pick Bot - automated cherry-pick PRs
// This exposes the core components for testing and integration

pub mod actions;
pub mod cherry_pick;
pub mod config;
pub mod external;
pub mod git;
pub mod github;
pub mod telemetry;

// Re-export key types for easy access
pub use cherry_pick::{
    CherryPickError, CherryPickOrchestrator, CherryPickOutcome, CherryPickRequest, CherryPickRun,
};
pub use config::{CommitIdentity, ConfigError, Inputs};
pub use external::{CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use git::{GitError, GitRunner};
pub use github::{
    CreatedPullRequest, GitHubError, PublishOptions, PullRequestHandler, PullRequestPublisher,
    SourcePullRequest,
};
pub use telemetry::{generate_correlation_id, init_telemetry};
