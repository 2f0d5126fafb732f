const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_PREFIXES: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens a user question for logging and masks anything that looks like a
/// credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total} chars total)")
    } else {
        trimmed.to_string()
    };

    redact_secrets(visible)
}

fn redact_secrets(mut text: String) -> String {
    for prefix in SECRET_PREFIXES {
        let mut search_from = 0;
        while let Some(found) = text[search_from..].find(prefix) {
            let value_start = search_from + found + prefix.len();
            let value_end = text[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map_or(text.len(), |i| value_start + i);
            text.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }
    text
}
