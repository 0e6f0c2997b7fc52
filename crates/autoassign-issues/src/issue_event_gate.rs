//! Context guards evaluated before any issue text is parsed.

use std::fmt;

use crate::issue_event_payload::{IssueAction, IssueEvent};

pub const DEFAULT_TRIGGER_LABEL: &str = "aa";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGateConfig {
    /// Label whose application re-triggers dispatch, compared case-insensitively.
    pub trigger_label: String,
}

impl Default for EventGateConfig {
    fn default() -> Self {
        Self {
            trigger_label: DEFAULT_TRIGGER_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `GateSkipReason` values.
pub enum GateSkipReason {
    NoIssue,
    EditWithoutBodyChange,
    NonTriggerLabel { label: String, trigger_label: String },
    NonDefaultRef { ref_name: String, default_branch: String },
    ForkedRepository,
}

impl fmt::Display for GateSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIssue => write!(f, "No issue in payload. Skipping."),
            Self::EditWithoutBodyChange => write!(f, "Issue edited without body change. Skipping."),
            Self::NonTriggerLabel {
                label,
                trigger_label,
            } => write!(
                f,
                "Label event is '{label}', not '{trigger_label}'. Skipping."
            ),
            Self::NonDefaultRef {
                ref_name,
                default_branch,
            } => write!(
                f,
                "Workflow running on '{ref_name}', default branch is '{default_branch}'. Skipping."
            ),
            Self::ForkedRepository => write!(f, "Repository is a fork. Skipping."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `GateDecision` values.
pub enum GateDecision {
    Proceed,
    Skip(GateSkipReason),
}

#[derive(Debug, Clone)]
pub struct EventGate {
    trigger_label: String,
}

impl EventGate {
    pub fn new(config: &EventGateConfig) -> Self {
        Self {
            trigger_label: config.trigger_label.trim().to_lowercase(),
        }
    }

    /// Run the guards in order; the first failing guard decides the skip.
    pub fn evaluate(&self, event: &IssueEvent) -> GateDecision {
        if event.action == IssueAction::Edited && !event.body_changed {
            return GateDecision::Skip(GateSkipReason::EditWithoutBodyChange);
        }

        if event.action == IssueAction::Labeled {
            let label = event.label_name.as_deref().unwrap_or_default();
            if label.trim().to_lowercase() != self.trigger_label {
                return GateDecision::Skip(GateSkipReason::NonTriggerLabel {
                    label: label.to_string(),
                    trigger_label: self.trigger_label.clone(),
                });
            }
        }

        if !event.ref_name.is_empty() && event.ref_name != event.default_branch {
            return GateDecision::Skip(GateSkipReason::NonDefaultRef {
                ref_name: event.ref_name.clone(),
                default_branch: event.default_branch.clone(),
            });
        }

        if event.is_fork {
            return GateDecision::Skip(GateSkipReason::ForkedRepository);
        }

        GateDecision::Proceed
    }
}
