use crate::github_transport_helpers::truncate_for_error;
use crate::issue_normalize::capitalize;

pub const ASSIGN_TOKEN_ENV: &str = "COPILOT_ASSIGN_TOKEN";
pub const KNOWN_AGENT_ROLES: &[&str] = &[
    "architect",
    "pm",
    "designer",
    "process",
    "swe",
    "qa",
    "devops",
    "security",
];
const ERROR_MESSAGE_MAX_CHARS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `FeedbackComment` values.
pub enum FeedbackComment {
    MissingOwner,
    PolicyBlocked {
        agent_id: String,
        privileged_role: String,
    },
    DispatchFailure {
        status: u16,
        message: String,
    },
}

impl FeedbackComment {
    pub fn render(&self) -> String {
        match self {
            Self::MissingOwner => render_missing_owner_comment(),
            Self::PolicyBlocked {
                agent_id,
                privileged_role,
            } => render_policy_blocked_comment(agent_id, privileged_role),
            Self::DispatchFailure { status, message } => {
                render_dispatch_failure_comment(*status, message)
            }
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::MissingOwner => "missing_owner",
            Self::PolicyBlocked { .. } => "policy_blocked",
            Self::DispatchFailure { .. } => "dispatch_failure",
        }
    }
}

pub fn render_missing_owner_comment() -> String {
    [
        "Copilot auto-assign skipped: `Owner-Agent:` was not found in the issue body.".to_string(),
        String::new(),
        "Please include at least these fields:".to_string(),
        "- `Parent:`".to_string(),
        format!("- `Owner-Agent: <{}>`", KNOWN_AGENT_ROLES.join("|")),
        "- `Gate:`".to_string(),
        "- `Dependencies:`".to_string(),
        String::new(),
        "After editing the body, the workflow will retry on `issues.edited`.".to_string(),
    ]
    .join("\n")
}

pub fn render_policy_blocked_comment(agent_id: &str, privileged_role: &str) -> String {
    [
        format!("Copilot auto-assign skipped for `{agent_id}` due to single-PR policy."),
        String::new(),
        "Repository is currently in integration PR mode:".to_string(),
        format!(
            "- Only `Owner-Agent: {privileged_role}` is auto-assigned to Copilot coding agent."
        ),
        "- Child/sub issues should proceed as planning and review artifacts in issue comments/docs."
            .to_string(),
        format!(
            "- {} owns the single stakeholder-visible integration PR.",
            capitalize(privileged_role)
        ),
    ]
    .join("\n")
}

pub fn render_dispatch_failure_comment(status: u16, message: &str) -> String {
    [
        format!("Copilot auto-assign failed with HTTP {status}."),
        String::new(),
        format!("Error: {}", truncate_for_error(message, ERROR_MESSAGE_MAX_CHARS)),
        String::new(),
        "Troubleshooting:".to_string(),
        "- Ensure Copilot coding agent is enabled for this repository.".to_string(),
        format!("- Ensure `{ASSIGN_TOKEN_ENV}` is configured and valid."),
        "- Required token permissions: Issues (Read and write), Contents (Read), Pull requests (Read and write recommended).".to_string(),
        "- Confirm `.github/agents/*.agent.md` contains the requested custom agent name.".to_string(),
        "- Verify the issue body includes `Owner-Agent:`.".to_string(),
    ]
    .join("\n")
}
