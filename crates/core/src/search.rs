//! Helpers for keyword search over catalog text.

/// Build an `ILIKE` pattern matching `keyword` anywhere in a value.
///
/// `%`, `_` and `\` in the keyword are escaped so they match literally.
/// Returns `None` if the keyword is blank.
pub fn contains_pattern(keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}
