//! Escape processing for string literal bodies.

/// Resolve the escapes in a string body (quotes already stripped).
///
/// Recognized: `\n` `\t` `\r` `\\` `\"` `\'`. Any other escaped character is
/// kept as-is without its backslash; a trailing lone backslash is dropped.
///
/// Returns `None` when the body has no backslash, so the caller can intern
/// the source slice directly.
pub(crate) fn cook_string(body: &str) -> Option<String> {
    if !body.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => {}
        }
    }
    Some(result)
}
