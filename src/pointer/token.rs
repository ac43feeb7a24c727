use std::fmt;

/// One addressing step of a [`Pointer`](super::Pointer).
///
/// A segment is kept as raw (unescaped) text. Whether it acts as a mapping
/// key or a sequence index is decided by the node it meets during traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Segment { text: String, optional: bool },
    /// `-`: one past the end of a sequence.
    Append,
}

impl Token {
    pub fn segment(text: impl Into<String>) -> Self {
        Token::Segment {
            text: text.into(),
            optional: false,
        }
    }

    pub fn optional(text: impl Into<String>) -> Self {
        Token::Segment {
            text: text.into(),
            optional: true,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Token::Segment { optional: true, .. })
    }

    /// The segment read as a sequence index, if it has that shape.
    ///
    /// Digits only, no sign, no leading zero except `0` itself.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Token::Segment { text, .. } => parse_index(text),
            Token::Append => None,
        }
    }
}

pub(crate) fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

pub(crate) fn escape(text: &str) -> String {
    if !text.contains(['~', '/']) {
        return text.to_string();
    }
    text.replace('~', "~0").replace('/', "~1")
}

/// Decode `~0` and `~1`. Any other use of `~` is rejected.
pub(crate) fn unescape(raw: &str) -> Result<String, String> {
    if !raw.contains('~') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            Some(other) => return Err(format!("invalid escape sequence '~{other}'")),
            None => return Err("dangling '~' at end of segment".to_string()),
        }
    }
    Ok(out)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Segment { text, optional } => {
                write!(f, "{}", escape(text))?;
                if *optional {
                    write!(f, "?")?;
                }
                Ok(())
            }
            Token::Append => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_shapes() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("1a"), None);
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("99999999999999999999999999"), None);
    }

    #[test]
    fn escape_round_trip() {
        let raw = "a/b~c";
        let escaped = escape(raw);
        assert_eq!(escaped, "a~1b~0c");
        assert_eq!(unescape(&escaped).unwrap(), raw);
    }

    #[test]
    fn rejects_bad_escape() {
        assert!(unescape("a~2").is_err());
        assert!(unescape("a~").is_err());
    }

    #[test]
    fn display_marks_optional() {
        assert_eq!(Token::optional("def").to_string(), "def?");
        assert_eq!(Token::Append.to_string(), "-");
    }
}
