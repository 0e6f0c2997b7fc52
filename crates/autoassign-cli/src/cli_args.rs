use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Boolean switch where only a literal `false` (any case, surrounding
/// whitespace ignored) disables; every other value enables.
pub fn parse_enabled_unless_false(value: &str) -> Result<bool, String> {
    Ok(!value.trim().eq_ignore_ascii_case("false"))
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "autoassign",
    about = "Triage GitHub issue events and dispatch eligible issues to the Copilot coding agent",
    version
)]
/// Public struct `Cli` used by the auto-assign binary.
pub struct Cli {
    #[arg(
        long = "token",
        env = "COPILOT_ASSIGN_TOKEN",
        hide_env_values = true,
        help = "GitHub token used for repository lookup, comments, and assignment"
    )]
    pub token: Option<String>,

    #[arg(
        long = "mcp-token",
        env = "COPILOT_MCP_GITHUB_PERSONAL_ACCESS_TOKEN",
        hide_env_values = true,
        help = "Fallback GitHub token used when --token is unset or blank"
    )]
    pub mcp_token: Option<String>,

    #[arg(
        long = "force-model",
        env = "COPILOT_ASSIGN_FORCE_MODEL",
        help = "Model that overrides any `Model:` line in the issue body"
    )]
    pub force_model: Option<String>,

    #[arg(
        long = "only-architect",
        env = "COPILOT_ASSIGN_ONLY_ARCHITECT",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_enabled_unless_false,
        help = "Dispatch only issues owned by the privileged role; the literal value `false` disables"
    )]
    pub only_architect: bool,

    #[arg(
        long = "privileged-role",
        env = "COPILOT_ASSIGN_PRIVILEGED_ROLE",
        default_value = "architect",
        help = "Role allowed to drive the single integration PR"
    )]
    pub privileged_role: String,

    #[arg(
        long = "trigger-label",
        env = "COPILOT_ASSIGN_TRIGGER_LABEL",
        default_value = "aa",
        help = "Label whose application triggers dispatch on `labeled` events"
    )]
    pub trigger_label: String,

    #[arg(
        long = "assignee",
        env = "COPILOT_ASSIGN_BOT",
        default_value = "copilot-swe-agent[bot]",
        help = "Bot login named as assignee in the assignment request"
    )]
    pub assignee: String,

    #[arg(
        long = "restricted-path",
        env = "COPILOT_ASSIGN_RESTRICTED_PATH",
        default_value = "/apps/web",
        help = "Repository path the dispatched agent is told not to modify"
    )]
    pub restricted_path: String,

    #[arg(
        long = "event-path",
        env = "GITHUB_EVENT_PATH",
        help = "Path to the JSON `issues` event payload"
    )]
    pub event_path: Option<PathBuf>,

    #[arg(
        long = "repository",
        env = "GITHUB_REPOSITORY",
        help = "Repository in owner/repo format"
    )]
    pub repository: Option<String>,

    #[arg(
        long = "ref-name",
        env = "GITHUB_REF_NAME",
        help = "Branch the workflow runs on"
    )]
    pub ref_name: Option<String>,

    #[arg(
        long = "git-ref",
        env = "GITHUB_REF",
        help = "Fully-qualified ref used when --ref-name is unset"
    )]
    pub git_ref: Option<String>,

    #[arg(
        long = "api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "GitHub API base URL"
    )]
    pub api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "COPILOT_ASSIGN_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Transport timeout for each GitHub API request"
    )]
    pub request_timeout_ms: u64,
}

impl Cli {
    /// First non-blank token among `--token` and `--mcp-token`.
    pub fn resolved_token(&self) -> Option<String> {
        [self.token.as_deref(), self.mcp_token.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|token| !token.is_empty())
            .map(ToOwned::to_owned)
    }

    /// Branch name the workflow runs on; empty when neither ref source is set.
    pub fn resolved_ref_name(&self) -> String {
        if let Some(ref_name) = self
            .ref_name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            return ref_name.to_string();
        }
        self.git_ref
            .as_deref()
            .map(str::trim)
            .map(|git_ref| git_ref.replacen("refs/heads/", "", 1))
            .unwrap_or_default()
    }

    pub fn forced_model(&self) -> Option<String> {
        self.force_model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .map(ToOwned::to_owned)
    }
}
