//! Base command execution abstraction
//!
//! Provides the foundational trait for executing external commands, enabling
//! dependency injection for testing.

use async_trait::async_trait;
use thiserror::Error;

/// Captured result of one command invocation. Read-only once produced.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
    #[error("IO error: {message}")]
    Io { message: String },
}

/// Trait for executing external commands.
///
/// The executor never interprets the exit code; it only captures it. Callers
/// decide which non-zero exits are tolerable (the cherry-pick step needs the
/// raw output of a failing command).
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Real implementation using tokio's process support
pub struct ProcessCommandExecutor;

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CommandError::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    CommandError::Io {
                        message: e.to_string(),
                    }
                }
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn process_executor_captures_stdout() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("echo", &["hello"]).await;

        assert!(result.is_ok());
        let output = result.unwrap();
        assert!(output.success());
        assert!(output.stdout.contains("hello"));
    }

    #[tokio::test]
    async fn process_executor_command_not_found() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("nonexistent_command_xyz", &[]).await;

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            CommandError::CommandNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn process_executor_reports_nonzero_exit_without_error() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("false", &[]).await;

        // Non-zero exit is data, not an error
        assert!(result.is_ok());
        assert!(!result.unwrap().success());
    }
}
