use std::path::Path;

use anyhow::{anyhow, Context, Result};
use autoassign_cli::Cli;
use autoassign_issues::issue_dispatch_policy::DispatchPolicyConfig;
use autoassign_issues::issue_event_gate::EventGateConfig;
use autoassign_issues::issue_event_payload::IssuesEventPayload;
use autoassign_runtime::{AutoAssignRuntimeConfig, RepoRef};

pub(crate) const MISSING_TOKEN_MESSAGE: &str =
    "Missing token. Configure COPILOT_ASSIGN_TOKEN or COPILOT_MCP_GITHUB_PERSONAL_ACCESS_TOKEN.";

pub(crate) fn resolve_token(cli: &Cli) -> Result<String> {
    cli.resolved_token()
        .ok_or_else(|| anyhow!(MISSING_TOKEN_MESSAGE))
}

pub(crate) fn build_runtime_config(cli: &Cli) -> Result<AutoAssignRuntimeConfig> {
    let repository = cli
        .repository
        .as_deref()
        .ok_or_else(|| anyhow!("missing repository; set GITHUB_REPOSITORY or --repository"))?;
    let repo = RepoRef::parse(repository)?;
    let assignee = cli.assignee.trim();
    if assignee.is_empty() {
        return Err(anyhow!("--assignee must not be empty"));
    }
    Ok(AutoAssignRuntimeConfig {
        repo,
        assignee: assignee.to_string(),
        gate: EventGateConfig {
            trigger_label: cli.trigger_label.clone(),
        },
        policy: DispatchPolicyConfig {
            forced_model: cli.forced_model(),
            only_privileged_role: cli.only_architect,
            privileged_role: cli.privileged_role.clone(),
            restricted_path: cli.restricted_path.clone(),
            ..DispatchPolicyConfig::default()
        },
    })
}

pub(crate) fn load_event_payload(path: Option<&Path>) -> Result<IssuesEventPayload> {
    let path =
        path.ok_or_else(|| anyhow!("missing event payload; set GITHUB_EVENT_PATH or --event-path"))?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event payload {}", path.display()))?;
    IssuesEventPayload::from_json_str(&raw)
        .with_context(|| format!("failed to parse event payload {}", path.display()))
}
