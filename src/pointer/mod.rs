//! Path language for addressing a node inside a document.
//!
//! ```text
//! pointer := "" | ("/" segment)+
//! segment := text | "-"
//! ```
//!
//! `~0` and `~1` escape `~` and `/` inside a segment. The final segment may
//! carry a trailing `?`, which lets a replace create a missing mapping key.

pub mod errors;
pub mod token;

pub use errors::PointerError;
pub use token::Token;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered, immutable list of [`Token`]s. The empty pointer is the whole
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<Token>,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, PointerError> {
        if input.is_empty() {
            return Ok(Self::root());
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Err(PointerError::syntax(input, "expected to start with '/'"));
        };

        let raw_segments: Vec<&str> = rest.split('/').collect();
        let last = raw_segments.len() - 1;
        let mut tokens = Vec::with_capacity(raw_segments.len());

        for (idx, raw) in raw_segments.into_iter().enumerate() {
            let is_last = idx == last;

            if raw == "-" {
                if !is_last {
                    return Err(PointerError::syntax(
                        input,
                        "append marker '-' is only allowed as the last segment",
                    ));
                }
                tokens.push(Token::Append);
                continue;
            }

            if raw == "-?" {
                return Err(PointerError::syntax(
                    input,
                    "append marker '-' cannot be optional",
                ));
            }

            let (body, optional) = match raw.strip_suffix('?') {
                Some(body) => (body, true),
                None => (raw, false),
            };

            if optional && !is_last {
                return Err(PointerError::syntax(
                    input,
                    format!("optional marker '?' is only allowed on the last segment (found '{raw}')"),
                ));
            }

            let text = token::unescape(body).map_err(|message| PointerError::syntax(input, message))?;
            tokens.push(Token::Segment { text, optional });
        }

        Ok(Self { tokens })
    }

    /// Build a pointer from tokens, enforcing the same placement rules as
    /// [`Pointer::parse`] so that the textual form always parses back.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, PointerError> {
        let pointer = Self { tokens };
        let rendered = pointer.to_string();
        let last = pointer.tokens.len().saturating_sub(1);

        for (idx, token) in pointer.tokens.iter().enumerate() {
            match token {
                Token::Append if idx != last => {
                    return Err(PointerError::syntax(
                        &rendered,
                        "append marker '-' is only allowed as the last segment",
                    ));
                }
                Token::Append => {}
                Token::Segment { text, optional } => {
                    if text == "-" {
                        return Err(PointerError::syntax(
                            &rendered,
                            "segment text '-' is reserved for the append marker",
                        ));
                    }
                    if *optional && idx != last {
                        return Err(PointerError::syntax(
                            &rendered,
                            "optional marker '?' is only allowed on the last segment",
                        ));
                    }
                    if text.ends_with('?') && !(*optional && idx == last) {
                        return Err(PointerError::syntax(
                            &rendered,
                            "segment text ending in '?' is only expressible on an optional last segment",
                        ));
                    }
                }
            }
        }

        Ok(pointer)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Textual form of the first `count` tokens. Used to report where a
    /// traversal stopped.
    pub fn prefix(&self, count: usize) -> String {
        render(&self.tokens[..count.min(self.tokens.len())])
    }
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&token.to_string());
    }
    out
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.tokens))
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Pointer::parse(value)
    }
}

impl Serialize for Pointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Pointer::parse(&text).map_err(serde::de::Error::custom)
    }
}
