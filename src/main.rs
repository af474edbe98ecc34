use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cherry_pick_bot::actions::{set_failed, set_output, ActionContext};
use cherry_pick_bot::cherry_pick::{CherryPickOrchestrator, CherryPickRequest};
use cherry_pick_bot::config::Inputs;
use cherry_pick_bot::external::ProcessCommandExecutor;
use cherry_pick_bot::git::GitRunner;
use cherry_pick_bot::github::{build_client, PublishOptions, PullRequestHandler};
use cherry_pick_bot::telemetry::{generate_correlation_id, init_telemetry};

#[derive(Parser)]
#[command(name = "cherry-pick-bot")]
#[command(about = "Cherry-pick a merged pull request onto a target branch and open a follow-up PR")]
#[command(long_about = "Runs as a pull_request workflow step after a merge: creates a branch from \
                       the target, cherry-picks the merge commit, optionally commits conflicts \
                       as-is, pushes, and opens the follow-up pull request.")]
struct Cli {}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _cli = Cli::parse();

    if init_telemetry().is_err() {
        eprintln!("Failed to initialize telemetry");
    }

    if let Err(err) = run().await {
        // Single top-level handler: mark the run failed, emit no outputs
        set_failed(&err.to_string());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let correlation_id = generate_correlation_id();
    let inputs = Inputs::load()?;
    info!(
        branch = %inputs.branch,
        correlation.id = %correlation_id,
        "Cherry pick into branch"
    );

    let context = ActionContext::from_env()?;
    let request = CherryPickRequest::from_inputs(&inputs, &context.pull_request)?;

    let octocrab = build_client(&inputs.token)?;
    let publisher = PullRequestHandler::new(
        octocrab,
        context.repo.owner.clone(),
        context.repo.repo.clone(),
        PublishOptions::from_inputs(&inputs),
        context.pull_request.clone(),
    );

    let git = GitRunner::new(Arc::new(ProcessCommandExecutor));
    let mut orchestrator = CherryPickOrchestrator::new(git, request, &publisher);
    let completed = orchestrator.run().await?;

    set_output("data", &serde_json::to_string(&completed.pull.data)?)?;
    set_output("number", &completed.pull.number.to_string())?;
    set_output("html_url", &completed.pull.html_url)?;

    Ok(())
}
