//! Value formatting for query text.
//!
//! All string values that end up inside single quotes go through
//! [`escape`], so there is exactly one place that decides how quote
//! characters are written.

use std::borrow::Cow;

/// Backslash-escapes `\` and `'` so the value can sit inside single quotes.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Wraps an escaped value in single quotes: `it's` → `'it\'s'`
pub fn quote(value: &str) -> String {
    format!("'{}'", escape(value))
}

/// Quotes every value and joins them with `, ` (no surrounding brackets).
pub fn quote_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `alias.column`, or just `column` when the alias is empty (root scope).
pub fn qualify(alias: &str, column: &str) -> String {
    if alias.is_empty() {
        column.to_string()
    } else {
        format!("{}.{}", alias, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("plain", "plain" ; "no special characters")]
    #[test_case("it's", r"it\'s" ; "single quote")]
    #[test_case(r"C:\temp", r"C:\\temp" ; "backslash")]
    #[test_case(r"\'", r"\\\'" ; "backslash before quote")]
    #[test_case("", "" ; "empty")]
    fn test_escape(input: &str, expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn test_escape_borrows_when_clean() {
        assert!(matches!(escape("room"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("x"), "'x'");
        assert_eq!(quote("O'Brien"), r"'O\'Brien'");
    }

    #[test]
    fn test_quote_list() {
        assert_eq!(quote_list(&["a", "b'c"]), r"'a', 'b\'c'");
        assert_eq!(quote_list::<&str>(&[]), "");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("twin", "name"), "twin.name");
        assert_eq!(qualify("", "name"), "name");
    }
}
