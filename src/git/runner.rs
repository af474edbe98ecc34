//! Git command runner
//!
//! Thin wrapper over the command executor that knows how to invoke git and
//! classify failures. Exit codes are either enforced (`run`) or handed back
//! raw (`run_tolerant`) for steps that must inspect a failing command's
//! output, like cherry-pick.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::external::{CommandError, CommandExecutor, CommandOutput};

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Repository not found or not a git repository")]
    RepositoryNotFound,
    #[error("Remote ref not found: {base_ref}")]
    RemoteRefNotFound { base_ref: String },
    #[error("git {args} failed: {stderr}")]
    CommandFailed { args: String, stderr: String },
    #[error("Command execution error: {source}")]
    Executor {
        #[from]
        source: CommandError,
    },
}

/// Runs git commands through an injected executor.
pub struct GitRunner {
    executor: Arc<dyn CommandExecutor>,
}

impl GitRunner {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Run a git command, failing on any non-zero exit.
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let output = self.run_tolerant(args).await?;
        if !output.success() {
            return Err(Self::classify(args, &output.stderr));
        }
        Ok(output)
    }

    /// Run a git command and return the captured output regardless of exit
    /// code, for callers that classify failures themselves.
    pub async fn run_tolerant(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let output = self.executor.execute("git", args).await?;

        if output.success() {
            let stdout = output.stdout.trim();
            if !stdout.is_empty() {
                info!(command = %format!("git {}", args.join(" ")), "{stdout}");
            }
        } else {
            info!(
                command = %format!("git {}", args.join(" ")),
                exit_code = output.exit_code,
                "{}",
                output.stderr.trim()
            );
        }

        Ok(output)
    }

    fn classify(args: &[&str], stderr: &str) -> GitError {
        if stderr.contains("not a git repository") {
            GitError::RepositoryNotFound
        } else if stderr.contains("is not a commit") || stderr.contains("Couldn't find remote ref")
        {
            // checkout -b <branch> origin/<base> with a missing base ref
            GitError::RemoteRefNotFound {
                base_ref: args.last().unwrap_or(&"unknown").to_string(),
            }
        } else {
            GitError::CommandFailed {
                args: args.join(" "),
                stderr: stderr.trim().to_string(),
            }
        }
    }
}
