//! Issue-body parsing, event gating, and dispatch policy for the auto-assign agent.
//! This crate is transport-free: runtime crates feed it event payloads and issue
//! bodies and act on the decisions and comment bodies it returns.

pub mod github_transport_helpers;
pub mod issue_dispatch_policy;
pub mod issue_event_gate;
pub mod issue_event_payload;
pub mod issue_feedback_comment;
pub mod issue_fields;
pub mod issue_normalize;
