//! End-to-end runs of operations files against the fixture documents in
//! `tests/fixtures/`.

mod failures;
mod overlays;

use doc_patcher::config::{load_document_from_path, load_from_path};
use doc_patcher::{Node, Ops};
use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_doc(name: &str) -> Node {
    load_document_from_path(fixture(name)).expect("fixture document should parse")
}

pub fn load_ops(name: &str) -> Ops {
    load_from_path(fixture(name)).expect("fixture operations should load")
}
