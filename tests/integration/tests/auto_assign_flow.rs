use std::sync::Arc;

use autoassign_issues::issue_dispatch_policy::DispatchPolicyConfig;
use autoassign_issues::issue_event_gate::GateSkipReason;
use autoassign_issues::issue_event_payload::IssuesEventPayload;
use autoassign_runtime::{
    AutoAssignRunOutcome, AutoAssignRuntime, AutoAssignRuntimeConfig, GithubApiClient, RepoRef,
};
use httpmock::prelude::*;
use serde_json::{json, Value};

fn runtime(server: &MockServer, policy: DispatchPolicyConfig) -> AutoAssignRuntime {
    let mut config = AutoAssignRuntimeConfig::new(RepoRef::parse("acme/widgets").expect("repo"));
    config.policy = policy;
    let client = GithubApiClient::new(&server.base_url(), "token", 2_000).expect("client");
    AutoAssignRuntime::new(config, Arc::new(client))
}

async fn run_payload(
    server: &MockServer,
    policy: DispatchPolicyConfig,
    payload: Value,
    ref_name: &str,
) -> AutoAssignRunOutcome {
    let payload = IssuesEventPayload::from_json_str(&payload.to_string()).expect("payload");
    let event = payload.issue_event(ref_name);
    let issue = payload.raw_issue();
    runtime(server, policy)
        .run(&event, issue.as_ref())
        .await
        .expect("run")
}

const ARCHITECT_BODY: &str = "Owner-Agent: \"Architect\"\n\
Gate: design review\n\
Dependencies: #12\n\
Parent: #10\n\
Model: 'gpt-5'\n\
\n\
Task\n\
Draft the\n\
integration plan\n\
\n\
Deliverables\n\
- plan.md\n";

#[tokio::test]
async fn integration_payload_to_dispatch_sends_composed_instructions() {
    let server = MockServer::start();
    let repo = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets");
        then.status(200).json_body(json!({ "default_branch": "trunk" }));
    });
    let assign = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/7/assignees")
            .json_body(json!({
                "assignees": ["copilot-swe-agent[bot]"],
                "agent_assignment": {
                    "target_repo": "acme/widgets",
                    "base_branch": "trunk",
                    "custom_instructions": "Assign to custom agent: architect. Gate: design review. Dependencies: #12. Parent: #10. No code changes under /apps/web - docs only. Single-PR policy: only architect may open/update the integration PR. Architect mode: delegate role-owned artifacts to child agents; do not directly execute PM/SWE/QA/DEVOPS/SECURITY/DESIGNER deliverables. Task: Draft the integration plan. Deliverables: - plan.md.",
                    "custom_agent": "architect",
                    "model": "gpt-5"
                }
            }));
        then.status(201).json_body(json!({ "number": 7 }));
    });

    let outcome = run_payload(
        &server,
        DispatchPolicyConfig::default(),
        json!({
            "action": "labeled",
            "label": { "name": "aa" },
            "issue": { "number": 7, "body": ARCHITECT_BODY },
            "repository": { "default_branch": "main", "fork": false }
        }),
        "main",
    )
    .await;

    assert_eq!(outcome.status_label(), "dispatched");
    repo.assert_calls(1);
    assign.assert_calls(1);
}

#[tokio::test]
async fn integration_forked_repository_payload_makes_no_calls() {
    let server = MockServer::start();
    let writes = server.mock(|when, then| {
        when.method(POST);
        then.status(201);
    });

    let outcome = run_payload(
        &server,
        DispatchPolicyConfig::default(),
        json!({
            "action": "opened",
            "issue": { "number": 7, "body": "Owner-Agent: architect" },
            "repository": { "default_branch": "main", "fork": true }
        }),
        "main",
    )
    .await;

    assert_eq!(
        outcome,
        AutoAssignRunOutcome::Skipped(GateSkipReason::ForkedRepository)
    );
    writes.assert_calls(0);
}

#[tokio::test]
async fn integration_payload_without_issue_is_skipped() {
    let server = MockServer::start();
    let outcome = run_payload(
        &server,
        DispatchPolicyConfig::default(),
        json!({ "action": "opened", "repository": { "default_branch": "main" } }),
        "main",
    )
    .await;
    assert_eq!(outcome, AutoAssignRunOutcome::Skipped(GateSkipReason::NoIssue));
}

#[tokio::test]
async fn integration_forbidden_dispatch_posts_troubleshooting_comment() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widgets");
        then.status(500);
    });
    let assign = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/9/assignees")
            .body_includes("\"base_branch\":\"main\"");
        then.status(403)
            .json_body(json!({ "message": "Resource not accessible by integration" }));
    });
    let comment = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/9/comments")
            .body_includes("HTTP 403")
            .body_includes("Resource not accessible by integration");
        then.status(201).json_body(json!({ "id": 3 }));
    });

    let outcome = run_payload(
        &server,
        DispatchPolicyConfig {
            only_privileged_role: false,
            ..DispatchPolicyConfig::default()
        },
        json!({
            "action": "edited",
            "changes": { "body": { "from": "old" } },
            "issue": { "number": 9, "body": "Owner-Agent: developer" },
            "repository": { "default_branch": "main" }
        }),
        "",
    )
    .await;

    assert_eq!(
        outcome,
        AutoAssignRunOutcome::DispatchFailed {
            status: 403,
            message: "Resource not accessible by integration".to_string(),
            commented: true,
        }
    );
    assign.assert_calls(1);
    comment.assert_calls(1);
}
