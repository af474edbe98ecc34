//! Cherry-pick orchestration state machine
//!
//! Linear sequence with one conditional branch after the cherry-pick attempt:
//! Init → CommitterConfigured → BranchesFetched → BranchCreated →
//! CherryPickAttempted → {Clean | ConflictHandled} → Pushed →
//! PullRequestCreated. The first unrecoverable failure aborts the run; partial
//! git state is left in place for manual inspection, no rollback.

use tracing::{debug, info};

use crate::actions::{end_group, start_group};
use crate::git::GitRunner;
use crate::github::types::CreatedPullRequest;
use crate::github::PullRequestPublisher;

use super::resolver;
use super::types::{
    CherryPickAttempt, CherryPickError, CherryPickOutcome, CherryPickRequest, PickState,
};

/// Terminal result of a successful run.
#[derive(Debug)]
pub struct CherryPickRun {
    pub outcome: CherryPickOutcome,
    pub pull: CreatedPullRequest,
}

pub struct CherryPickOrchestrator<'a> {
    git: GitRunner,
    request: CherryPickRequest,
    publisher: &'a dyn PullRequestPublisher,
    state: PickState,
}

impl<'a> CherryPickOrchestrator<'a> {
    pub fn new(
        git: GitRunner,
        request: CherryPickRequest,
        publisher: &'a dyn PullRequestPublisher,
    ) -> Self {
        Self {
            git,
            request,
            publisher,
            state: PickState::Init,
        }
    }

    fn advance(&mut self, next: PickState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }

    /// Drive the run to completion. Each step gates the next; every command
    /// and API call is awaited before the sequence continues.
    pub async fn run(&mut self) -> Result<CherryPickRun, CherryPickError> {
        self.configure_committer().await?;
        self.fetch_branches().await?;
        self.create_branch().await?;
        let outcome = self.cherry_pick().await?;
        self.push().await?;

        start_group("Opening pull request");
        let pull = self
            .publisher
            .publish(&self.request.new_branch, outcome.conflict)
            .await?;
        self.advance(PickState::PullRequestCreated);
        end_group();

        Ok(CherryPickRun { outcome, pull })
    }

    async fn configure_committer(&mut self) -> Result<(), CherryPickError> {
        start_group("Configuring the committer and author");
        info!(
            "Configured git committer as '{} <{}>'",
            self.request.committer.name, self.request.committer.email
        );
        // user.name is set from the author, user.email from the committer
        let name = self.request.author.name.clone();
        let email = self.request.committer.email.clone();
        self.git
            .run(&["config", "--global", "user.name", &name])
            .await?;
        self.git
            .run(&["config", "--global", "user.email", &email])
            .await?;
        self.advance(PickState::CommitterConfigured);
        end_group();
        Ok(())
    }

    async fn fetch_branches(&mut self) -> Result<(), CherryPickError> {
        start_group("Fetch all branches");
        self.git.run(&["remote", "update"]).await?;
        self.git.run(&["fetch", "--all"]).await?;
        self.advance(PickState::BranchesFetched);
        end_group();
        Ok(())
    }

    async fn create_branch(&mut self) -> Result<(), CherryPickError> {
        start_group(&format!(
            "Create new branch {} from {}",
            self.request.new_branch, self.request.target_branch
        ));
        let base = format!("origin/{}", self.request.target_branch);
        let branch = self.request.new_branch.clone();
        self.git.run(&["checkout", "-b", &branch, &base]).await?;
        self.advance(PickState::BranchCreated);
        end_group();
        Ok(())
    }

    async fn cherry_pick(&mut self) -> Result<CherryPickOutcome, CherryPickError> {
        start_group("Cherry picking");
        let strategy_option = format!("--strategy-option={}", self.request.strategy_option);
        let source_commit = self.request.source_commit.clone();
        let output = self
            .git
            .run_tolerant(&[
                "cherry-pick",
                "-m",
                "1",
                "--strategy=recursive",
                &strategy_option,
                &source_commit,
            ])
            .await?;
        self.advance(PickState::CherryPickAttempted);

        let mut outcome = CherryPickOutcome {
            conflict: false,
            conflicted_paths: Vec::new(),
            branch: self.request.new_branch.clone(),
        };

        match resolver::classify_attempt(&output)? {
            CherryPickAttempt::Clean | CherryPickAttempt::AlreadyEmpty => {
                self.advance(PickState::Clean);
            }
            CherryPickAttempt::Conflict => {
                outcome.conflict = true;
                if !self.request.commit_conflicts {
                    return Err(CherryPickError::ConflictPolicy);
                }
                info!("Conflicts detected. Finding and committing conflicted files...");
                outcome.conflicted_paths =
                    resolver::commit_conflicts(&self.git, &source_commit).await?;
                self.advance(PickState::ConflictHandled);
            }
        }
        end_group();

        Ok(outcome)
    }

    async fn push(&mut self) -> Result<(), CherryPickError> {
        start_group("Push new branch to remote");
        let branch = self.request.new_branch.clone();
        if self.request.force_push {
            self.git
                .run(&["push", "-u", "origin", &branch, "--force"])
                .await?;
        } else {
            self.git.run(&["push", "-u", "origin", &branch]).await?;
        }
        self.advance(PickState::Pushed);
        end_group();
        Ok(())
    }
}
