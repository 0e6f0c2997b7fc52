//! One auto-assign run: gate the event, decide, then comment or dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use autoassign_issues::issue_dispatch_policy::{
    AgentAssignment, DispatchDecision, DispatchPolicyConfig, DispatchPolicyEngine, DispatchTarget,
};
use autoassign_issues::issue_event_gate::{EventGate, EventGateConfig, GateDecision, GateSkipReason};
use autoassign_issues::issue_event_payload::{IssueEvent, RawIssue};
use autoassign_issues::issue_feedback_comment::FeedbackComment;
use autoassign_issues::issue_fields::ExtractedFields;

use crate::dispatcher::{DispatchOutcome, Dispatcher, COPILOT_BOT_LOGIN};
use crate::tracker::{IssueTracker, RepoRef};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Runtime configuration for a single auto-assign invocation.
pub struct AutoAssignRuntimeConfig {
    pub repo: RepoRef,
    /// Login the assignment request names as assignee.
    pub assignee: String,
    pub gate: EventGateConfig,
    pub policy: DispatchPolicyConfig,
}

impl AutoAssignRuntimeConfig {
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            assignee: COPILOT_BOT_LOGIN.to_string(),
            gate: EventGateConfig::default(),
            policy: DispatchPolicyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `AutoAssignRunOutcome` values.
pub enum AutoAssignRunOutcome {
    Skipped(GateSkipReason),
    MissingOwner,
    PolicyBlocked {
        agent_id: String,
    },
    Dispatched {
        assignment: AgentAssignment,
    },
    DispatchFailed {
        status: u16,
        message: String,
        commented: bool,
    },
}

impl AutoAssignRunOutcome {
    /// Dispatch failures fail the run so they surface to operators.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::DispatchFailed { .. })
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::MissingOwner => "missing_owner",
            Self::PolicyBlocked { .. } => "policy_blocked",
            Self::Dispatched { .. } => "dispatched",
            Self::DispatchFailed { .. } => "dispatch_failed",
        }
    }
}

pub struct AutoAssignRuntime {
    config: AutoAssignRuntimeConfig,
    tracker: Arc<dyn IssueTracker>,
    gate: EventGate,
    engine: DispatchPolicyEngine,
}

impl AutoAssignRuntime {
    pub fn new(config: AutoAssignRuntimeConfig, tracker: Arc<dyn IssueTracker>) -> Self {
        let gate = EventGate::new(&config.gate);
        let engine = DispatchPolicyEngine::new(config.policy.clone());
        Self {
            config,
            tracker,
            gate,
            engine,
        }
    }

    /// Process one event. `Err` is reserved for failures to post feedback;
    /// dispatch failures come back as [`AutoAssignRunOutcome::DispatchFailed`].
    pub async fn run(
        &self,
        event: &IssueEvent,
        issue: Option<&RawIssue>,
    ) -> Result<AutoAssignRunOutcome> {
        let Some(issue) = issue else {
            return Ok(self.skip(GateSkipReason::NoIssue));
        };
        if let GateDecision::Skip(reason) = self.gate.evaluate(event) {
            return Ok(self.skip(reason));
        }

        let fields = ExtractedFields::from_body(&issue.body);
        let target = DispatchTarget {
            repo_slug: self.config.repo.as_slug(),
            base_branch: event.default_branch.clone(),
        };

        match self.engine.decide(&fields, &target) {
            DispatchDecision::MissingOwner => {
                self.post_feedback(issue.number, &FeedbackComment::MissingOwner)
                    .await?;
                tracing::info!(
                    issue = issue.number,
                    "Skipped assignment due to missing Owner-Agent."
                );
                Ok(AutoAssignRunOutcome::MissingOwner)
            }
            DispatchDecision::PolicyBlocked { agent_id } => {
                tracing::info!(
                    issue = issue.number,
                    custom_agent = %agent_id,
                    privileged_role = %self.engine.privileged_role(),
                    "Skipping assignment because only the privileged role is dispatched."
                );
                let comment = FeedbackComment::PolicyBlocked {
                    agent_id: agent_id.clone(),
                    privileged_role: self.engine.privileged_role().to_string(),
                };
                self.post_feedback(issue.number, &comment).await?;
                Ok(AutoAssignRunOutcome::PolicyBlocked { agent_id })
            }
            DispatchDecision::Eligible { assignment } => self.dispatch(issue, assignment).await,
        }
    }

    fn skip(&self, reason: GateSkipReason) -> AutoAssignRunOutcome {
        tracing::info!(reason = %reason, "auto-assign skipped");
        AutoAssignRunOutcome::Skipped(reason)
    }

    async fn dispatch(
        &self,
        issue: &RawIssue,
        assignment: AgentAssignment,
    ) -> Result<AutoAssignRunOutcome> {
        if issue.is_assigned_to(&self.config.assignee) {
            tracing::info!(
                issue = issue.number,
                assignee = %self.config.assignee,
                custom_agent = %assignment.custom_agent,
                model = %assignment.model_label(),
                "Issue already assigned; sending assignment payload again."
            );
        }

        let dispatcher = Dispatcher::new(
            self.tracker.as_ref(),
            &self.config.repo,
            &self.config.assignee,
        );
        let base_branch = dispatcher
            .resolve_base_branch(&assignment.base_branch)
            .await;
        let assignment = assignment.with_base_branch(base_branch);
        tracing::info!(
            issue = issue.number,
            custom_agent = %assignment.custom_agent,
            model = %assignment.model_label(),
            base_branch = %assignment.base_branch,
            "Attempting assignment."
        );

        let outcome = dispatcher.dispatch(issue.number, &assignment).await;
        let commented = outcome.is_permission_failure();
        match outcome {
            DispatchOutcome::Sent => {
                tracing::info!(
                    issue = issue.number,
                    custom_agent = %assignment.custom_agent,
                    model = %assignment.model_label(),
                    "Copilot assignment request sent successfully."
                );
                Ok(AutoAssignRunOutcome::Dispatched { assignment })
            }
            DispatchOutcome::Failed { status, message } => {
                tracing::error!(
                    issue = issue.number,
                    status,
                    message = %message,
                    "Assignment failed."
                );
                if commented {
                    let comment = FeedbackComment::DispatchFailure {
                        status,
                        message: message.clone(),
                    };
                    self.post_feedback(issue.number, &comment).await?;
                }
                Ok(AutoAssignRunOutcome::DispatchFailed {
                    status,
                    message,
                    commented,
                })
            }
        }
    }

    async fn post_feedback(&self, issue_number: u64, comment: &FeedbackComment) -> Result<()> {
        self.tracker
            .create_comment(&self.config.repo, issue_number, &comment.render())
            .await
            .with_context(|| {
                format!(
                    "failed to post {} comment on issue #{issue_number}",
                    comment.kind_label()
                )
            })
    }
}
