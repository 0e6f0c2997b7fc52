use serde_json::Value;

/// Statuses that point at repository configuration or token scope rather than
/// a transient upstream problem.
pub fn is_permission_failure_status(status: u16) -> bool {
    matches!(status, 403 | 404)
}

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Extract the human-readable `message` from a GitHub error body, falling back
/// to the bounded raw body when it is not the usual JSON envelope.
pub fn github_error_message(body: &str, max_chars: usize) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .map(ToOwned::to_owned)
        })
        .filter(|message| !message.is_empty());
    match from_json {
        Some(message) => truncate_for_error(&message, max_chars),
        None => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                truncate_for_error(trimmed, max_chars)
            }
        }
    }
}
