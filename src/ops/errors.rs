use crate::node::Mapping;
use thiserror::Error;

/// Coarse classification of a [`PatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    ExpectedContainer,
    ExpectedKey,
    InvalidIndex,
    InvalidUseOfAppend,
    CannotRemoveRoot,
    AssertionFailed,
    Described,
}

/// Failure while applying an operation to a document.
///
/// Locating variants carry `path`, the pointer text of the place where the
/// traversal stopped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("expected to find mapping key '{key}' for path '{path}'{}", key_hint(.known, .suggestion))]
    KeyNotFound {
        path: String,
        key: String,
        known: Vec<String>,
        suggestion: Option<String>,
    },

    #[error("expected to find sequence index {index} for path '{path}' but found sequence of length {len}")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("expected to find a mapping or sequence at path '{path}' but found {found}")]
    ExpectedContainer { path: String, found: &'static str },

    #[error("expected a mapping key for path '{path}' but found the append marker")]
    ExpectedKey { path: String },

    #[error("expected a sequence index for path '{path}' but found segment '{segment}'")]
    InvalidIndex { path: String, segment: String },

    #[error("append marker cannot be used by {op} (path '{path}')")]
    InvalidUseOfAppend { path: String, op: &'static str },

    #[error("cannot remove the entire document")]
    CannotRemoveRoot,

    #[error("assertion failed for path '{path}': {reason}")]
    AssertionFailed { path: String, reason: String },

    #[error("{message}")]
    Described { message: String },
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::KeyNotFound { .. } | PatchError::IndexOutOfRange { .. } => {
                ErrorKind::NotFound
            }
            PatchError::ExpectedContainer { .. } => ErrorKind::ExpectedContainer,
            PatchError::ExpectedKey { .. } => ErrorKind::ExpectedKey,
            PatchError::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            PatchError::InvalidUseOfAppend { .. } => ErrorKind::InvalidUseOfAppend,
            PatchError::CannotRemoveRoot => ErrorKind::CannotRemoveRoot,
            PatchError::AssertionFailed { .. } => ErrorKind::AssertionFailed,
            PatchError::Described { .. } => ErrorKind::Described,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn key_not_found(path: String, key: &str, map: &Mapping) -> Self {
        let known = map.key_names();
        let suggestion = closest(key, &known);
        PatchError::KeyNotFound {
            path,
            key: key.to_string(),
            known,
            suggestion,
        }
    }
}

/// Failure of one operation inside an [`Ops`](super::Ops) sequence.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("operation [{index}] ({op}) failed: {source}")]
pub struct OpsError {
    pub index: usize,
    pub op: &'static str,
    #[source]
    pub source: PatchError,
}

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Closest candidate by Jaro-Winkler similarity, if any is close enough.
pub(crate) fn closest(needle: &str, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(needle, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.clone())
}

fn key_hint(known: &[String], suggestion: &Option<String>) -> String {
    let mut hint = if known.is_empty() {
        " (mapping is empty)".to_string()
    } else {
        let keys: Vec<String> = known.iter().map(|k| format!("'{k}'")).collect();
        format!(" (found keys: {})", keys.join(", "))
    };
    if let Some(suggestion) = suggestion {
        hint.push_str(&format!("; did you mean '{suggestion}'?"));
    }
    hint
}
