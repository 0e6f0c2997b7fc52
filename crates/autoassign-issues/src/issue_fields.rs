//! Single-line `Key: value` and heading-delimited section extraction over
//! free-text issue bodies.

use regex::RegexBuilder;

pub const OWNER_AGENT_KEY: &str = "Owner-Agent";
pub const GATE_KEY: &str = "Gate";
pub const DEPENDENCIES_KEY: &str = "Dependencies";
pub const PARENT_KEY: &str = "Parent";
pub const MODEL_KEY: &str = "Model";
pub const TASK_HEADING: &str = "Task";
pub const DELIVERABLES_HEADING: &str = "Deliverables";

/// Find the first `key: value` line (case-insensitive key, anywhere in the body).
///
/// Returns `None` when no key line carries anything after the colon and
/// `Some("")` when the first such line holds only whitespace. Later duplicates
/// of the key are ignored.
pub fn find_line(body: &str, key: &str) -> Option<String> {
    let pattern = format!(r"^[^\S\r\n]*{}[^\S\r\n]*:(.+)$", regex::escape(key));
    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .multi_line(true)
        .crlf(true)
        .build()
        .ok()?;

    let captures = matcher.captures(body)?;
    let value = captures
        .get(1)
        .map(|value| value.as_str().trim())
        .unwrap_or_default();
    Some(value.to_string())
}

/// Value of the first `key:` line, or an empty string when absent or blank.
pub fn extract_line(body: &str, key: &str) -> String {
    find_line(body, key).unwrap_or_default()
}

/// Text between a heading line and the first following stop heading.
///
/// Headings match whole lines, case-insensitively, ignoring surrounding
/// whitespace. Returns `None` when the heading line does not exist.
pub fn find_section(body: &str, heading: &str, stop_headings: &[&str]) -> Option<String> {
    let normalized = body.replace("\r\n", "\n");
    let mut lines = normalized.split('\n');
    lines.by_ref().find(|line| is_heading_line(line, heading))?;

    let mut collected = Vec::new();
    for line in lines {
        if stop_headings
            .iter()
            .any(|stop_heading| is_heading_line(line, stop_heading))
        {
            break;
        }
        collected.push(line);
    }
    Some(collected.join("\n").trim().to_string())
}

pub fn extract_section(body: &str, heading: &str, stop_headings: &[&str]) -> String {
    find_section(body, heading, stop_headings).unwrap_or_default()
}

fn is_heading_line(line: &str, heading: &str) -> bool {
    line.trim().to_lowercase() == heading.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Raw values pulled out of an issue body. `None` means the field is absent;
/// `Some("")` means it is present but blank.
pub struct ExtractedFields {
    pub owner_agent: Option<String>,
    pub gate: Option<String>,
    pub dependencies: Option<String>,
    pub parent: Option<String>,
    pub model: Option<String>,
    pub task: Option<String>,
    pub deliverables: Option<String>,
}

impl ExtractedFields {
    pub fn from_body(body: &str) -> Self {
        Self {
            owner_agent: find_line(body, OWNER_AGENT_KEY),
            gate: find_line(body, GATE_KEY),
            dependencies: find_line(body, DEPENDENCIES_KEY),
            parent: find_line(body, PARENT_KEY),
            model: find_line(body, MODEL_KEY),
            task: find_section(body, TASK_HEADING, &[DELIVERABLES_HEADING]),
            deliverables: find_section(body, DELIVERABLES_HEADING, &[]),
        }
    }

    pub fn owner_agent_value(&self) -> &str {
        self.owner_agent.as_deref().unwrap_or_default()
    }
}
