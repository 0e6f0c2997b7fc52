use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use autoassign_issues::github_transport_helpers::github_error_message;
use autoassign_issues::issue_dispatch_policy::AgentAssignment;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::tracker::{IssueTracker, RepoRef, RepositoryInfo, TrackerError};

const ERROR_BODY_MAX_CHARS: usize = 800;

#[derive(Debug, Deserialize)]
struct GithubRepositoryResponse {
    #[serde(default)]
    default_branch: Option<String>,
}

/// GitHub REST client. Every call is a single request; failures are returned
/// to the caller rather than retried.
#[derive(Clone)]
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubApiClient {
    pub fn new(api_base: &str, token: &str, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("autoassign-issues-agent"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid github authorization header")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http: client,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, TrackerError> {
        let response = request
            .send()
            .await
            .map_err(|source| TrackerError::Transport { operation, source })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TrackerError::Status {
            operation,
            status: status.as_u16(),
            message: github_error_message(&body, ERROR_BODY_MAX_CHARS),
        })
    }

    async fn send_json<T>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TrackerError>
    where
        T: DeserializeOwned,
    {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|source| TrackerError::Decode { operation, source })
    }
}

#[async_trait]
impl IssueTracker for GithubApiClient {
    async fn get_repository(&self, repo: &RepoRef) -> Result<RepositoryInfo, TrackerError> {
        let response: GithubRepositoryResponse = self
            .send_json("get repository", self.http.get(self.repo_url(repo)))
            .await?;
        Ok(RepositoryInfo {
            default_branch: response.default_branch.unwrap_or_default(),
        })
    }

    async fn create_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<(), TrackerError> {
        let request = self
            .http
            .post(format!(
                "{}/issues/{}/comments",
                self.repo_url(repo),
                issue_number
            ))
            .json(&json!({ "body": body }));
        self.send("create issue comment", request).await?;
        Ok(())
    }

    async fn assign_with_payload(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        assignee: &str,
        assignment: &AgentAssignment,
    ) -> Result<(), TrackerError> {
        let request = self
            .http
            .post(format!(
                "{}/issues/{}/assignees",
                self.repo_url(repo),
                issue_number
            ))
            .json(&json!({
                "assignees": [assignee],
                "agent_assignment": assignment,
            }));
        self.send("assign issue", request).await?;
        Ok(())
    }
}
