/// lowercase the whole word, then uppercase only its first character
pub fn capitalize_word(w: &mut String) {
    let lower = w.to_lowercase();
    let mut chars = lower.chars();
    *w = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
}

pub fn lowercase_word(w: &mut String) {
    *w = w.to_lowercase();
}

/// length as the user sees it, counted on a lowercased copy
pub fn visible_len(w: &str) -> usize {
    w.to_lowercase().chars().count()
}

/// collect the contents of every `"..."` pair in order of appearance
pub fn extract_quoted(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('"') {
        let after_open = &rest[open + 1..];
        // an unterminated trailing quote carries no word
        let Some(close) = after_open.find('"') else {
            break;
        };
        let inner = &after_open[..close];
        if !inner.is_empty() {
            out.push(inner.to_string());
        }
        rest = &after_open[close + 1..];
    }

    out
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}
