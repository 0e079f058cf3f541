//! Text helpers shared by element behaviors.

/// Collapse runs of spaces, tabs, carriage returns and newlines into a single
/// space, then trim leading and trailing spaces.
///
/// A chunk that normalizes to the empty string is treated as elidable by the
/// quiz behaviors.
///
/// # Examples
///
/// ```
/// use academy_markup::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("\n\t What  is\n  Rust? \n"), "What is Rust?");
/// assert_eq!(normalize_whitespace(" \n\t "), "");
/// ```
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if matches!(ch, ' ' | '\t' | '\n' | '\r') {
            pending_space = true;
            continue;
        }
        if pending_space && !normalized.is_empty() {
            normalized.push(' ');
        }
        pending_space = false;
        normalized.push(ch);
    }
    normalized
}

/// Escape text for use in HTML content or a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use academy_markup::escape_html;
///
/// assert_eq!(escape_html(r#"a < b & "c""#), "a &lt; b &amp; &quot;c&quot;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Upper-case the first character of a tag name.
///
/// This is the key under which behaviors are registered.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_mixed_runs() {
        assert_eq!(normalize_whitespace("a\r\n\t  b"), "a b");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_whitespace("   padded   "), "padded");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("\n\n"), "");
    }

    #[test]
    fn test_normalize_keeps_other_characters() {
        assert_eq!(normalize_whitespace("x\u{a0}y"), "x\u{a0}y");
    }

    #[test]
    fn test_escape_html_plain() {
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_escape_html_markup() {
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("quiz"), "Quiz");
        assert_eq!(capitalize("Python"), "Python");
        assert_eq!(capitalize("markup-root"), "Markup-root");
        assert_eq!(capitalize(""), "");
    }
}
