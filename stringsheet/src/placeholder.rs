//! Placeholder extraction for translation-consistency checks.
//!
//! Two placeholder families show up in the supported formats: message
//! placeholders in braces (`{count}`) and printf-style tokens (`%s`,
//! `%1$d`, `%d`). A translation that drops or renames a placeholder its
//! template has is almost certainly broken, so imports flag the mismatch.
//! Comparison is order-insensitive; translators reorder freely.

/// Extracts the sorted placeholder signature of `input`.
///
/// `{{`, `}}` and `%%` escapes are ignored. Brace placeholders must be
/// plain identifiers (`[A-Za-z0-9_]+`); anything else in braces is treated
/// as literal text.
pub fn signature(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                if bytes.get(i + 1) == Some(&b'{') {
                    i += 2;
                    continue;
                }
                if let Some(token) = scan_brace(input, i) {
                    i += token.len();
                    tokens.push(token);
                } else {
                    i += 1;
                }
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => i += 2,
            b'%' => {
                if bytes.get(i + 1) == Some(&b'%') {
                    i += 2;
                    continue;
                }
                if let Some(token) = scan_percent(input, i) {
                    i += token.len();
                    tokens.push(token);
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    tokens.sort();
    tokens
}

/// Whether `translated` carries a different placeholder signature than
/// `template`. Empty translations never mismatch.
pub fn mismatch(template: &str, translated: &str) -> bool {
    if translated.trim().is_empty() {
        return false;
    }
    signature(template) != signature(translated)
}

fn scan_brace(input: &str, start: usize) -> Option<String> {
    let bytes = input.as_bytes();
    let mut end = start + 1;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    if end > start + 1 && bytes.get(end) == Some(&b'}') {
        Some(input[start..=end].to_string())
    } else {
        None
    }
}

fn scan_percent(input: &str, start: usize) -> Option<String> {
    let bytes = input.as_bytes();
    let mut end = start + 1;
    // Optional positional index, e.g. %1$s.
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end > digits_start {
        if bytes.get(end) != Some(&b'$') {
            return None;
        }
        end += 1;
    }
    match bytes.get(end) {
        Some(kind) if kind.is_ascii_alphabetic() => Some(input[start..=end].to_string()),
        _ => None,
    }
}
