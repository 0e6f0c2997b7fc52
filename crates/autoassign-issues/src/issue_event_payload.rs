use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_BRANCH_FALLBACK: &str = "main";

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubUser` used by issue payloads.
pub struct GithubUser {
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayloadIssue {
    pub number: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assignees: Option<Vec<GithubUser>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PayloadChanges {
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PayloadLabel {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PayloadRepository {
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub fork: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// Subset of the GitHub `issues` webhook payload the agent reads.
pub struct IssuesEventPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub issue: Option<PayloadIssue>,
    #[serde(default)]
    pub changes: Option<PayloadChanges>,
    #[serde(default)]
    pub label: Option<PayloadLabel>,
    #[serde(default)]
    pub repository: Option<PayloadRepository>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `IssueAction` values.
pub enum IssueAction {
    Opened,
    Edited,
    Labeled,
    Other(String),
}

impl IssueAction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "opened" => Self::Opened,
            "edited" => Self::Edited,
            "labeled" => Self::Labeled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
            Self::Labeled => "labeled",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Triggering event and repository context for one invocation.
pub struct IssueEvent {
    pub action: IssueAction,
    pub body_changed: bool,
    pub label_name: Option<String>,
    pub default_branch: String,
    pub is_fork: bool,
    /// Branch the workflow runs on; empty when unknown.
    pub ref_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Snapshot of the issue at invocation time.
pub struct RawIssue {
    pub number: u64,
    pub body: String,
    pub assignees: Vec<String>,
}

impl RawIssue {
    pub fn is_assigned_to(&self, login: &str) -> bool {
        self.assignees
            .iter()
            .any(|assignee| assignee.eq_ignore_ascii_case(login))
    }
}

impl IssuesEventPayload {
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn issue_event(&self, ref_name: &str) -> IssueEvent {
        let repository = self.repository.clone().unwrap_or_default();
        let default_branch = repository
            .default_branch
            .map(|branch| branch.trim().to_string())
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH_FALLBACK.to_string());
        IssueEvent {
            action: IssueAction::parse(self.action.as_deref().unwrap_or_default()),
            body_changed: self
                .changes
                .as_ref()
                .and_then(|changes| changes.body.as_ref())
                .is_some_and(|body| !body.is_null()),
            label_name: self
                .label
                .as_ref()
                .and_then(|label| label.name.clone()),
            default_branch,
            is_fork: repository.fork.unwrap_or(false),
            ref_name: ref_name.trim().to_string(),
        }
    }

    /// Issue snapshot, or `None` when the payload carries no usable issue.
    pub fn raw_issue(&self) -> Option<RawIssue> {
        let issue = self.issue.as_ref()?;
        if issue.number == 0 {
            return None;
        }
        Some(RawIssue {
            number: issue.number,
            body: issue.body.clone().unwrap_or_default(),
            assignees: issue
                .assignees
                .iter()
                .flatten()
                .map(|assignee| assignee.login.clone())
                .filter(|login| !login.is_empty())
                .collect(),
        })
    }
}
