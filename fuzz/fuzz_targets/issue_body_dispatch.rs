#![no_main]

use autoassign_issues::issue_dispatch_policy::{
    DispatchDecision, DispatchPolicyConfig, DispatchPolicyEngine, DispatchTarget,
    MAX_INSTRUCTION_CHARS,
};
use autoassign_issues::issue_fields::ExtractedFields;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);
    let fields = ExtractedFields::from_body(&body);
    let engine = DispatchPolicyEngine::new(DispatchPolicyConfig {
        only_privileged_role: false,
        ..DispatchPolicyConfig::default()
    });
    let target = DispatchTarget {
        repo_slug: "owner/repo".to_string(),
        base_branch: "main".to_string(),
    };
    if let DispatchDecision::Eligible { assignment } = engine.decide(&fields, &target) {
        assert!(!assignment.custom_agent.is_empty());
        assert!(assignment.custom_instructions.chars().count() <= MAX_INSTRUCTION_CHARS);
    }
});
