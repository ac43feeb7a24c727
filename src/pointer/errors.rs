use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("invalid pointer syntax '{input}': {message}")]
    InvalidSyntax { input: String, message: String },
}

impl PointerError {
    pub(crate) fn syntax(input: &str, message: impl Into<String>) -> Self {
        PointerError::InvalidSyntax {
            input: input.to_string(),
            message: message.into(),
        }
    }

    /// The reason without the echoed input.
    pub fn message(&self) -> &str {
        match self {
            PointerError::InvalidSyntax { message, .. } => message,
        }
    }
}
