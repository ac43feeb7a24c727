pub mod loader;
pub mod parser;
pub mod schema;

pub use loader::{
    definitions_from_str, load_document_from_path, load_from_path, load_from_str, parse_document,
    Format, LoadError,
};
pub use parser::{
    definitions_from_ops, ops_from_definitions, render_redacted, DefinitionError,
    DefinitionIssue, REDACTED,
};
pub use schema::{OpDefinition, OpType};
