//! Shared test doubles for orchestrator flow tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use cherry_pick_bot::external::{CommandError, CommandExecutor, CommandOutput};
use cherry_pick_bot::github::types::CreatedPullRequest;
use cherry_pick_bot::github::{GitHubError, PullRequestPublisher};

/// Command executor driven by a script: responses are keyed by the full
/// command line, every invocation is recorded in order, and unscripted
/// commands succeed with empty output (most git steps in the happy path).
pub struct ScriptedExecutor {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, command_line: &str, output: CommandOutput) -> Self {
        self.responses.insert(command_line.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn ok_output(stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failed_output(exit_code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        exit_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let key = format!("{} {}", program, args.join(" "));
        self.calls.lock().unwrap().push(key.clone());
        Ok(self.responses.get(&key).cloned().unwrap_or(ok_output("")))
    }
}

/// Publisher that records what the orchestrator hands it and returns a canned
/// pull request.
pub struct MockPublisher {
    pub calls: Mutex<Vec<(String, bool)>>,
    pub response_number: u64,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response_number: 43,
        }
    }

    pub fn published(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestPublisher for MockPublisher {
    async fn publish(
        &self,
        head_branch: &str,
        conflict: bool,
    ) -> Result<CreatedPullRequest, GitHubError> {
        self.calls
            .lock()
            .unwrap()
            .push((head_branch.to_string(), conflict));

        Ok(CreatedPullRequest {
            number: self.response_number,
            html_url: format!("https://github.com/octocat/hello-world/pull/{}", self.response_number),
            data: serde_json::json!({ "number": self.response_number }),
        })
    }
}
