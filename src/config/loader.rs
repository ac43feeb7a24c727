use crate::config::parser::{ops_from_definitions, DefinitionError};
use crate::config::schema::OpDefinition;
use crate::node::Node;
use crate::ops::Ops;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Text encodings understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            other => Err(format!("unsupported format '{other}'")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Yaml => write!(f, "YAML"),
            Format::Toml => write!(f, "TOML"),
        }
    }
}

/// TOML has no top-level arrays, so operations live under `[[ops]]`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlOpsFile {
    #[serde(default)]
    ops: Vec<OpDefinition>,
}

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    UnknownFormat {
        path: PathBuf,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Yaml {
        path: Option<PathBuf>,
        source: serde_yaml::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Definition {
        path: Option<PathBuf>,
        source: DefinitionError,
    },
}

impl LoadError {
    fn with_path(self, path: &Path) -> Self {
        let path = Some(path.to_path_buf());
        match self {
            LoadError::Json { path: None, source } => LoadError::Json { path, source },
            LoadError::Yaml { path: None, source } => LoadError::Yaml { path, source },
            LoadError::Toml { path: None, source } => LoadError::Toml { path, source },
            LoadError::Definition { path: None, source } => LoadError::Definition { path, source },
            other => other,
        }
    }
}

fn fmt_origin(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" ({})", path.display()),
        None => String::new(),
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::UnknownFormat { path } => write!(
                f,
                "cannot tell the format of {} (expected .json, .yaml, .yml or .toml)",
                path.display()
            ),
            LoadError::Json { path, source } => {
                write!(f, "failed to parse JSON{}: {}", fmt_origin(path), source)
            }
            LoadError::Yaml { path, source } => {
                write!(f, "failed to parse YAML{}: {}", fmt_origin(path), source)
            }
            LoadError::Toml { path, source } => {
                write!(f, "failed to parse TOML{}: {}", fmt_origin(path), source)
            }
            LoadError::Definition { path, source } => {
                write!(f, "invalid operations file{}: {}", fmt_origin(path), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::UnknownFormat { .. } => None,
            LoadError::Json { source, .. } => Some(source),
            LoadError::Yaml { source, .. } => Some(source),
            LoadError::Toml { source, .. } => Some(source),
            LoadError::Definition { source, .. } => Some(source),
        }
    }
}

/// Decode descriptors without validating them.
pub fn definitions_from_str(input: &str, format: Format) -> Result<Vec<OpDefinition>, LoadError> {
    match format {
        Format::Json => {
            serde_json::from_str(input).map_err(|source| LoadError::Json { path: None, source })
        }
        Format::Yaml => {
            serde_yaml::from_str(input).map_err(|source| LoadError::Yaml { path: None, source })
        }
        Format::Toml => toml_edit::de::from_str::<TomlOpsFile>(input)
            .map(|file| file.ops)
            .map_err(|source| LoadError::Toml { path: None, source }),
    }
}

/// Decode and validate an operations file held in memory.
pub fn load_from_str(input: &str, format: Format) -> Result<Ops, LoadError> {
    let definitions = definitions_from_str(input, format)?;
    ops_from_definitions(&definitions)
        .map_err(|source| LoadError::Definition { path: None, source })
}

/// Read an operations file, picking the format from its extension.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Ops, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let ops = load_from_str(&contents, format).map_err(|error| error.with_path(path))?;
    info!(path = %path.display(), %format, count = ops.len(), "loaded operations");
    Ok(ops)
}

/// Decode a document to patch.
pub fn parse_document(input: &str, format: Format) -> Result<Node, LoadError> {
    match format {
        Format::Json => {
            serde_json::from_str(input).map_err(|source| LoadError::Json { path: None, source })
        }
        Format::Yaml => {
            serde_yaml::from_str(input).map_err(|source| LoadError::Yaml { path: None, source })
        }
        Format::Toml => {
            toml_edit::de::from_str(input).map_err(|source| LoadError::Toml { path: None, source })
        }
    }
}

pub fn load_document_from_path(path: impl AsRef<Path>) -> Result<Node, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&contents, format).map_err(|error| error.with_path(path))
}
