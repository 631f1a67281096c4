/// Escapes text so it is inserted into a page as text, never as markup.
///
/// Used for element content and for double-quoted attribute values alike.
pub fn sanitize_input(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Drops control characters (C0, DEL and C1) so remote text cannot drive
/// the terminal it is printed to.
pub fn strip_control(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

/// Splits a `key=value` control assignment. The key is trimmed and
/// lowercased; the value is trimmed but otherwise kept as typed.
pub fn parse_key_value(value: &str) -> Result<(String, String), String> {
    let raw = value.trim();
    let (key, val) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim().to_ascii_lowercase();
    if key.is_empty() {
        return Err("missing key before '='".to_string());
    }
    Ok((key, val.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_escapes_markup_characters() {
        assert_eq!(
            sanitize_input("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(sanitize_input("Ben & Jerry \"Co\""), "Ben &amp; Jerry &quot;Co&quot;");
    }

    #[test]
    fn sanitize_leaves_plain_text_alone() {
        assert_eq!(sanitize_input("Acme · US"), "Acme · US");
        assert_eq!(sanitize_input(""), "");
    }

    #[test]
    fn strip_control_removes_terminal_control_bytes() {
        assert_eq!(
            strip_control("Evil\x1b[2J\x1b]0;pwned\x07"),
            "Evil[2J]0;pwned"
        );
        assert_eq!(strip_control("a\u{9b}b\r\nc\u{7f}"), "abc");
        assert_eq!(strip_control("Émile · FR"), "Émile · FR");
    }

    #[test]
    fn parse_key_value_trims_and_lowercases_key() {
        assert_eq!(
            parse_key_value("  Country = New Zealand ").unwrap(),
            ("country".to_string(), "New Zealand".to_string())
        );
        assert_eq!(
            parse_key_value("industry=").unwrap(),
            ("industry".to_string(), String::new())
        );
    }

    #[test]
    fn parse_key_value_rejects_missing_separator_or_key() {
        assert!(parse_key_value("country").is_err());
        assert!(parse_key_value("=US").is_err());
    }
}
