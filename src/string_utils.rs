//! String utility functions shared by the rewrite passes and diagnostics.

/// Strip the first matching prefix from a string.
///
/// Returns `None` if no prefix matched.
///
/// # Example
///
/// ```
/// use delazy::string_utils::strip_any_prefix_checked;
///
/// const KEYWORDS: &[&str] = &["const ", "let ", "var "];
/// assert_eq!(strip_any_prefix_checked("const Foo = 1", KEYWORDS), Some("Foo = 1"));
/// assert_eq!(strip_any_prefix_checked("let Foo = 1", KEYWORDS), Some("Foo = 1"));
/// assert_eq!(strip_any_prefix_checked("Foo = 1", KEYWORDS), None);
/// ```
pub fn strip_any_prefix_checked<'a>(s: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| s.strip_prefix(prefix))
}

/// Cut `s` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &s[..byte_index]),
        None => s.to_string(),
    }
}

/// True if `s` is a plain JavaScript identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// True if the whole line is a comment (`//`, `/*` or a ` * ` continuation).
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Byte offsets where `ident` occurs as a whole identifier in `haystack`.
///
/// An occurrence counts only when it is not glued to other identifier
/// characters on either side, so `lazy` is found in `lazy(` and `React.lazy`
/// but not in `lazyLoad` or `isLazy`.
pub fn identifier_positions<'a>(
    haystack: &'a str,
    ident: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    let is_ident_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
    haystack
        .match_indices(ident)
        .map(|(start, _)| start)
        .filter(move |&start| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[start + ident.len()..].chars().next();
            !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
        })
        .filter(move |_| !ident.is_empty())
}
