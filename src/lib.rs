//! Doc Patcher: structural patch operations for YAML/JSON document trees
//!
//! Edits are small, serializable instructions (replace, remove, test, copy,
//! move) addressed by a compact pointer language, so the same list of
//! operations can be replayed against many base documents.
//!
//! # Architecture
//!
//! - [`node`]: the untyped tree. Containers share children through `Arc`.
//! - [`pointer`]: parsing and printing of paths such as `/jobs/0/name?`.
//! - [`ops`]: find, the copy-on-write mutations, and the [`Ops`] runner.
//! - [`config`]: the flat descriptor format and the operations file loader.
//!
//! # Guarantees
//!
//! - Inputs are never mutated; only containers on the edited path are rebuilt
//! - A sequence stops at the first failing operation and reports its index
//! - Descriptor values are redacted whenever a descriptor is shown in an error
//!
//! # Example
//!
//! ```
//! use doc_patcher::config::{load_from_str, parse_document, Format};
//!
//! let doc = parse_document("name: web\ninstances: [a, b]\n", Format::Yaml)?;
//! let ops = load_from_str(
//!     r#"
//! - type: replace
//!   path: /instances/-
//!   value: c
//! - type: move
//!   path: /title?
//!   from: /name
//! "#,
//!     Format::Yaml,
//! )?;
//!
//! let patched = ops.apply(&doc)?;
//! let expected = parse_document("title: web\ninstances: [a, b, c]\n", Format::Yaml)?;
//! assert_eq!(patched, expected);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod node;
pub mod ops;
pub mod pointer;

// Re-exports
pub use config::{
    definitions_from_ops, load_from_path, load_from_str, ops_from_definitions, DefinitionError,
    Format, LoadError, OpDefinition,
};
pub use node::{Mapping, Node, Sequence};
pub use ops::{
    find, remove, replace, CopyOp, DescriptiveOp, ErrorKind, Expected, MoveOp, Op, Ops, OpsError,
    PatchError, QuietCopyOp, QuietMoveOp, RemoveOp, ReplaceOp, SourcePolicy, TestOp,
};
pub use pointer::{Pointer, PointerError, Token};
