use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use autoassign_issues::issue_dispatch_policy::AgentAssignment;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| anyhow!("invalid repository '{raw}', expected owner/repo"))?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            bail!("invalid repository '{raw}', expected owner/repo");
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub default_branch: String,
}

#[derive(Debug, Error)]
/// Enumerates supported `TrackerError` values.
pub enum TrackerError {
    #[error("github api {operation} failed with status {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },
    #[error("github api {operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode github {operation}: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl TrackerError {
    /// HTTP status of the failure, or `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Transport { .. } | Self::Decode { .. } => 0,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Narrow issue-tracker surface the auto-assign run needs.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn get_repository(&self, repo: &RepoRef) -> Result<RepositoryInfo, TrackerError>;

    async fn create_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<(), TrackerError>;

    async fn assign_with_payload(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        assignee: &str,
        assignment: &AgentAssignment,
    ) -> Result<(), TrackerError>;
}
