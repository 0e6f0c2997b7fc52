//! Runtime for the issue auto-assign agent.
//!
//! Wires the transport-free decisions from `autoassign-issues` to an issue
//! tracker: posting feedback comments, resolving the base branch, and sending
//! the coding-agent assignment request.

pub mod auto_assign_runtime;
pub mod dispatcher;
pub mod github_api_client;
pub mod tracker;

pub use auto_assign_runtime::{AutoAssignRunOutcome, AutoAssignRuntime, AutoAssignRuntimeConfig};
pub use dispatcher::{DispatchOutcome, Dispatcher, COPILOT_BOT_LOGIN};
pub use github_api_client::GithubApiClient;
pub use tracker::{IssueTracker, RepoRef, RepositoryInfo, TrackerError};
