//! Binary entrypoint for the issue auto-assign agent.

use std::sync::Arc;

use anyhow::{bail, Result};
use autoassign_cli::Cli;
use autoassign_runtime::{AutoAssignRunOutcome, AutoAssignRuntime, GithubApiClient};
use clap::Parser;

mod bootstrap_helpers;
mod startup_config;

use bootstrap_helpers::init_tracing;
use startup_config::{build_runtime_config, load_event_payload, resolve_token};

async fn run_cli(cli: Cli) -> Result<()> {
    let token = resolve_token(&cli)?;
    let config = build_runtime_config(&cli)?;
    let payload = load_event_payload(cli.event_path.as_deref())?;
    let event = payload.issue_event(&cli.resolved_ref_name());
    let issue = payload.raw_issue();

    let client = GithubApiClient::new(&cli.api_base, &token, cli.request_timeout_ms)?;
    let runtime = AutoAssignRuntime::new(config, Arc::new(client));
    let outcome = runtime.run(&event, issue.as_ref()).await?;
    tracing::debug!(status = outcome.status_label(), "auto-assign run finished");

    if let AutoAssignRunOutcome::DispatchFailed { status, .. } = outcome {
        bail!("Copilot auto-assign failed with status={status}.");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    run_cli(Cli::parse()).await
}
