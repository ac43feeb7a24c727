use super::{fixture, load_doc, load_ops};
use doc_patcher::config::{load_from_path, LoadError};
use doc_patcher::{ErrorKind, PatchError};

#[test]
fn descriptive_failure_reports_operator_message() {
    let base = load_doc("deployment.yml");
    let ops = load_ops("wrong-group.yml");

    let err = ops.apply(&base).expect_err("assertion should fail");
    assert_eq!(err.index, 1);
    assert_eq!(err.op, "test");
    assert_eq!(
        err.source,
        PatchError::Described {
            message: "first instance group must be db".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "operation [1] (test) failed: first instance group must be db"
    );
}

#[test]
fn failed_run_returns_no_partial_document() {
    let base = load_doc("deployment.yml");
    let err = load_ops("wrong-group.yml")
        .apply(&base)
        .expect_err("assertion should fail");

    // the rename at index 0 ran, but only the error comes back
    assert_eq!(err.source.kind(), ErrorKind::Described);
    assert_eq!(
        base.as_mapping()
            .and_then(|m| m.get(&"name".into()))
            .and_then(|n| n.as_str()),
        Some("shop")
    );
}

#[test]
fn missing_fixture_is_an_io_error() {
    let err = load_from_path(fixture("does-not-exist.yml")).expect_err("file is missing");
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let err = load_from_path(fixture("deployment.ini")).expect_err("extension is unknown");
    assert!(matches!(err, LoadError::UnknownFormat { .. }));
    assert!(err.to_string().contains("deployment.ini"));
}
