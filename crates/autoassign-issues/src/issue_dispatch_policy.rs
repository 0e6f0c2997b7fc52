//! Dispatch decision and instruction composition for a parsed issue.

use serde::Serialize;

use crate::issue_fields::ExtractedFields;
use crate::issue_normalize::{capitalize, compact, truncate, NormalizedRequest};

pub const DEFAULT_PRIVILEGED_ROLE: &str = "architect";
pub const DEFAULT_RESTRICTED_PATH: &str = "/apps/web";
pub const MAX_INSTRUCTION_CHARS: usize = 1_200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicyConfig {
    /// Model that overrides any `Model:` line in the issue body.
    pub forced_model: Option<String>,
    /// When set, only `privileged_role` issues are dispatched.
    pub only_privileged_role: bool,
    pub privileged_role: String,
    /// Path the dispatched agent must not modify.
    pub restricted_path: String,
    pub max_instruction_chars: usize,
}

impl Default for DispatchPolicyConfig {
    fn default() -> Self {
        Self {
            forced_model: None,
            only_privileged_role: true,
            privileged_role: DEFAULT_PRIVILEGED_ROLE.to_string(),
            restricted_path: DEFAULT_RESTRICTED_PATH.to_string(),
            max_instruction_chars: MAX_INSTRUCTION_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Repository the assignment targets and the branch known from the event.
pub struct DispatchTarget {
    pub repo_slug: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// `agent_assignment` payload attached to the assignment request.
pub struct AgentAssignment {
    pub target_repo: String,
    pub base_branch: String,
    pub custom_instructions: String,
    pub custom_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AgentAssignment {
    pub fn with_base_branch(mut self, base_branch: impl Into<String>) -> Self {
        self.base_branch = base_branch.into();
        self
    }

    pub fn model_label(&self) -> &str {
        self.model.as_deref().unwrap_or("(omitted)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `DispatchDecision` values.
pub enum DispatchDecision {
    MissingOwner,
    PolicyBlocked { agent_id: String },
    Eligible { assignment: AgentAssignment },
}

#[derive(Debug, Clone)]
pub struct DispatchPolicyEngine {
    config: DispatchPolicyConfig,
    privileged_role: String,
}

impl DispatchPolicyEngine {
    pub fn new(config: DispatchPolicyConfig) -> Self {
        let privileged_role = crate::issue_normalize::normalize_agent_id(&config.privileged_role);
        Self {
            config,
            privileged_role,
        }
    }

    pub fn privileged_role(&self) -> &str {
        &self.privileged_role
    }

    pub fn decide(&self, fields: &ExtractedFields, target: &DispatchTarget) -> DispatchDecision {
        let Some(request) =
            NormalizedRequest::from_fields(fields, self.config.forced_model.as_deref())
        else {
            return DispatchDecision::MissingOwner;
        };

        if self.config.only_privileged_role && request.agent_id != self.privileged_role {
            return DispatchDecision::PolicyBlocked {
                agent_id: request.agent_id,
            };
        }

        DispatchDecision::Eligible {
            assignment: AgentAssignment {
                target_repo: target.repo_slug.clone(),
                base_branch: target.base_branch.clone(),
                custom_instructions: self.compose_instructions(&request),
                model: request.model().map(ToOwned::to_owned),
                custom_agent: request.agent_id,
            },
        }
    }

    /// Build the bounded instruction text; blank optional sentences are dropped.
    pub fn compose_instructions(&self, request: &NormalizedRequest) -> String {
        let mut sentences = vec![
            format!("Assign to custom agent: {}.", request.agent_id),
            format!("Gate: {}.", request.gate),
            format!("Dependencies: {}.", request.dependencies),
            format!("Parent: {}.", request.parent),
            format!(
                "No code changes under {} - docs only.",
                self.config.restricted_path
            ),
            format!(
                "Single-PR policy: only {} may open/update the integration PR.",
                self.privileged_role
            ),
        ];
        if request.agent_id == self.privileged_role {
            sentences.push(format!(
                "{} mode: delegate role-owned artifacts to child agents; do not directly execute PM/SWE/QA/DEVOPS/SECURITY/DESIGNER deliverables.",
                capitalize(&self.privileged_role)
            ));
        }
        if !request.task.is_empty() {
            sentences.push(format!("Task: {}.", request.task));
        }
        if !request.deliverables.is_empty() {
            sentences.push(format!("Deliverables: {}.", request.deliverables));
        }

        truncate(
            &compact(&sentences.join(" ")),
            self.config.max_instruction_chars,
        )
    }
}
