use autoassign_issues::github_transport_helpers::is_permission_failure_status;
use autoassign_issues::issue_dispatch_policy::AgentAssignment;

use crate::tracker::{IssueTracker, RepoRef};

pub const COPILOT_BOT_LOGIN: &str = "copilot-swe-agent[bot]";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `DispatchOutcome` values.
pub enum DispatchOutcome {
    Sent,
    Failed { status: u16, message: String },
}

impl DispatchOutcome {
    /// True for failures the repository owner can likely fix (403/404).
    pub fn is_permission_failure(&self) -> bool {
        match self {
            Self::Sent => false,
            Self::Failed { status, .. } => is_permission_failure_status(*status),
        }
    }
}

/// Sends one assignment request per eligible issue.
pub struct Dispatcher<'a> {
    tracker: &'a dyn IssueTracker,
    repo: &'a RepoRef,
    assignee: &'a str,
}

impl<'a> Dispatcher<'a> {
    pub fn new(tracker: &'a dyn IssueTracker, repo: &'a RepoRef, assignee: &'a str) -> Self {
        Self {
            tracker,
            repo,
            assignee,
        }
    }

    /// Current default branch from the tracker, or `fallback` when the lookup
    /// fails or returns nothing.
    pub async fn resolve_base_branch(&self, fallback: &str) -> String {
        match self.tracker.get_repository(self.repo).await {
            Ok(info) if !info.default_branch.trim().is_empty() => {
                info.default_branch.trim().to_string()
            }
            Ok(_) => fallback.to_string(),
            Err(error) => {
                tracing::warn!(
                    repo = %self.repo.as_slug(),
                    error = %error,
                    "Could not fetch repo default branch; using fallback '{fallback}'."
                );
                fallback.to_string()
            }
        }
    }

    pub async fn dispatch(&self, issue_number: u64, assignment: &AgentAssignment) -> DispatchOutcome {
        match self
            .tracker
            .assign_with_payload(self.repo, issue_number, self.assignee, assignment)
            .await
        {
            Ok(()) => DispatchOutcome::Sent,
            Err(error) => DispatchOutcome::Failed {
                status: error.status(),
                message: error.message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use autoassign_issues::issue_dispatch_policy::AgentAssignment;

    use super::{DispatchOutcome, Dispatcher, COPILOT_BOT_LOGIN};
    use crate::tracker::{IssueTracker, RepoRef, RepositoryInfo, TrackerError};

    struct ScriptedTracker {
        default_branch: Option<String>,
        assign_status: Option<u16>,
        assignees: Mutex<Vec<String>>,
    }

    impl ScriptedTracker {
        fn new(default_branch: Option<&str>, assign_status: Option<u16>) -> Self {
            Self {
                default_branch: default_branch.map(ToOwned::to_owned),
                assign_status,
                assignees: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IssueTracker for ScriptedTracker {
        async fn get_repository(&self, _repo: &RepoRef) -> Result<RepositoryInfo, TrackerError> {
            match &self.default_branch {
                Some(branch) => Ok(RepositoryInfo {
                    default_branch: branch.clone(),
                }),
                None => Err(TrackerError::Status {
                    operation: "get repository",
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }

        async fn create_comment(
            &self,
            _repo: &RepoRef,
            _issue_number: u64,
            _body: &str,
        ) -> Result<(), TrackerError> {
            Ok(())
        }

        async fn assign_with_payload(
            &self,
            _repo: &RepoRef,
            _issue_number: u64,
            assignee: &str,
            _assignment: &AgentAssignment,
        ) -> Result<(), TrackerError> {
            self.assignees
                .lock()
                .expect("assignees lock")
                .push(assignee.to_string());
            match self.assign_status {
                None => Ok(()),
                Some(status) => Err(TrackerError::Status {
                    operation: "assign issue",
                    status,
                    message: format!("status {status}"),
                }),
            }
        }
    }

    fn assignment() -> AgentAssignment {
        AgentAssignment {
            target_repo: "owner/repo".to_string(),
            base_branch: "main".to_string(),
            custom_instructions: "x".to_string(),
            custom_agent: "architect".to_string(),
            model: None,
        }
    }

    #[tokio::test]
    async fn unit_resolve_base_branch_prefers_tracker_value() {
        let tracker = ScriptedTracker::new(Some("develop"), None);
        let repo = RepoRef::parse("owner/repo").expect("repo");
        let dispatcher = Dispatcher::new(&tracker, &repo, COPILOT_BOT_LOGIN);
        assert_eq!(dispatcher.resolve_base_branch("main").await, "develop");
    }

    #[tokio::test]
    async fn regression_resolve_base_branch_falls_back_on_failure_or_blank() {
        let repo = RepoRef::parse("owner/repo").expect("repo");
        let failing = ScriptedTracker::new(None, None);
        assert_eq!(
            Dispatcher::new(&failing, &repo, COPILOT_BOT_LOGIN)
                .resolve_base_branch("main")
                .await,
            "main"
        );
        let blank = ScriptedTracker::new(Some("  "), None);
        assert_eq!(
            Dispatcher::new(&blank, &repo, COPILOT_BOT_LOGIN)
                .resolve_base_branch("trunk")
                .await,
            "trunk"
        );
    }

    #[tokio::test]
    async fn functional_dispatch_classifies_outcomes() {
        let repo = RepoRef::parse("owner/repo").expect("repo");

        let ok = ScriptedTracker::new(Some("main"), None);
        let outcome = Dispatcher::new(&ok, &repo, COPILOT_BOT_LOGIN)
            .dispatch(7, &assignment())
            .await;
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(
            ok.assignees.lock().expect("lock").as_slice(),
            [COPILOT_BOT_LOGIN.to_string()]
        );

        let forbidden = ScriptedTracker::new(Some("main"), Some(403));
        let outcome = Dispatcher::new(&forbidden, &repo, COPILOT_BOT_LOGIN)
            .dispatch(7, &assignment())
            .await;
        assert!(outcome.is_permission_failure());

        let unavailable = ScriptedTracker::new(Some("main"), Some(502));
        let outcome = Dispatcher::new(&unavailable, &repo, COPILOT_BOT_LOGIN)
            .dispatch(7, &assignment())
            .await;
        assert_eq!(
            outcome,
            DispatchOutcome::Failed {
                status: 502,
                message: "status 502".to_string(),
            }
        );
        assert!(!outcome.is_permission_failure());
    }
}
