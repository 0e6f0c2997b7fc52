use crate::issue_fields::ExtractedFields;

pub const ELLIPSIS: char = '…';
pub const UNSET_FIELD_SENTINEL: &str = "None";

/// Lowercase an agent identifier and strip backticks, quotes, and whitespace.
pub fn normalize_agent_id(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '`' | '\'' | '"') && !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strip one leading and one trailing straight quote, then trim.
pub fn normalize_model_id(raw: &str) -> String {
    const QUOTES: &[char] = &['\'', '"'];
    let stripped = raw.strip_prefix(QUOTES).unwrap_or(raw);
    let stripped = stripped.strip_suffix(QUOTES).unwrap_or(stripped);
    stripped.trim().to_string()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse every whitespace run (newlines included) into a single space.
pub fn compact(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bound `text` to `max_chars` characters, marking a cut with a trailing `…`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut truncated = text.chars().take(max_chars - 1).collect::<String>();
    truncated.push(ELLIPSIS);
    truncated
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Comparable, defaulted view of an issue's dispatch fields.
pub struct NormalizedRequest {
    pub agent_id: String,
    /// Empty when neither an override nor the body names a model.
    pub model_id: String,
    pub gate: String,
    pub dependencies: String,
    pub parent: String,
    pub task: String,
    pub deliverables: String,
}

impl NormalizedRequest {
    /// Normalize extracted fields. Returns `None` when no usable owner agent is
    /// declared, since the responsible role is never guessed.
    pub fn from_fields(fields: &ExtractedFields, forced_model: Option<&str>) -> Option<Self> {
        let agent_id = normalize_agent_id(fields.owner_agent_value());
        if agent_id.is_empty() {
            return None;
        }

        let forced_model = forced_model.map(normalize_model_id).unwrap_or_default();
        let model_id = if forced_model.is_empty() {
            fields
                .model
                .as_deref()
                .map(normalize_model_id)
                .unwrap_or_default()
        } else {
            forced_model
        };

        Some(Self {
            agent_id,
            model_id,
            gate: or_unset(fields.gate.as_deref()),
            dependencies: or_unset(fields.dependencies.as_deref()),
            parent: or_unset(fields.parent.as_deref()),
            task: compact(fields.task.as_deref().unwrap_or_default()),
            deliverables: compact(fields.deliverables.as_deref().unwrap_or_default()),
        })
    }

    pub fn model(&self) -> Option<&str> {
        (!self.model_id.is_empty()).then_some(self.model_id.as_str())
    }
}

fn or_unset(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNSET_FIELD_SENTINEL.to_string(),
    }
}
