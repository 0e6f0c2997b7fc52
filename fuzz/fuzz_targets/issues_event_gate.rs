#![no_main]

use autoassign_issues::issue_event_gate::{EventGate, EventGateConfig};
use autoassign_issues::issue_event_payload::IssuesEventPayload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(payload) = IssuesEventPayload::from_json_str(&raw) else {
        return;
    };
    let event = payload.issue_event("main");
    assert!(!event.default_branch.is_empty());
    let _ = EventGate::new(&EventGateConfig::default()).evaluate(&event);
    if let Some(issue) = payload.raw_issue() {
        assert_ne!(issue.number, 0);
    }
});
