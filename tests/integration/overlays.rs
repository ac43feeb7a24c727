use super::{load_doc, load_ops};
use doc_patcher::config::definitions_from_ops;
use doc_patcher::{find, ops_from_definitions, Node, Pointer};

fn ptr(text: &str) -> Pointer {
    Pointer::parse(text).expect("valid pointer")
}

#[test]
fn yaml_overlay_produces_expected_document() {
    let base = load_doc("deployment.yml");
    let ops = load_ops("scale-out.yml");
    assert_eq!(ops.len(), 8);

    let patched = ops.apply(&base).expect("overlay should apply");
    assert_eq!(patched, load_doc("deployment.scaled.yml"));
}

#[test]
fn every_encoding_of_the_overlay_is_equivalent() {
    let yaml = load_ops("scale-out.yml");
    let json = load_ops("scale-out.json");
    let toml = load_ops("scale-out.toml");

    assert_eq!(yaml, json);
    assert_eq!(yaml, toml);

    let base = load_doc("deployment.yml");
    let expected = load_doc("deployment.scaled.yml");
    for ops in [&yaml, &json, &toml] {
        assert_eq!(ops.apply(&base).expect("overlay should apply"), expected);
    }
}

#[test]
fn base_document_is_untouched() {
    let base = load_doc("deployment.yml");
    let snapshot = base.clone();

    load_ops("scale-out.yml")
        .apply(&base)
        .expect("overlay should apply");

    assert_eq!(base, snapshot);
    assert_eq!(
        find(&base, &ptr("/instance_groups/1/properties/password")).expect("still there"),
        &Node::from("hunter2")
    );
}

#[test]
fn untouched_branches_are_shared_with_the_base() {
    let base = load_doc("deployment.yml");
    let patched = load_ops("scale-out.yml")
        .apply(&base)
        .expect("overlay should apply");

    let releases = ptr("/releases");
    let before = find(&base, &releases).expect("releases in base");
    let after = find(&patched, &releases).expect("releases in result");
    assert!(before.ptr_eq(after));
}

#[test]
fn overlay_is_stable_through_descriptors() {
    let ops = load_ops("scale-out.yml");
    let definitions = definitions_from_ops(&ops);

    assert_eq!(definitions[0].error.as_deref(), Some("first instance group must be web"));
    assert_eq!(definitions[7].absent, Some(true));

    let rebuilt = ops_from_definitions(&definitions).expect("descriptors should rebuild");
    assert_eq!(rebuilt, ops);
}

#[test]
fn second_run_stops_at_the_renamed_password() {
    let base = load_doc("deployment.yml");
    let ops = load_ops("scale-out.yml");
    let once = ops.apply(&base).expect("first run");

    // the first run moved password away, and qmove does not tolerate that
    let err = ops.apply(&once).expect_err("second run should fail");
    assert_eq!(err.index, 4);
    assert_eq!(err.op, "qmove");
    assert!(err.source.is_not_found());
    assert!(err.to_string().contains("'password'"));
}

#[test]
fn quiet_copy_in_overlay_fills_the_new_key() {
    let patched = load_ops("scale-out.yml")
        .apply(&load_doc("deployment.yml"))
        .expect("overlay should apply");
    assert_eq!(
        find(&patched, &ptr("/instance_groups/1/properties/web_port")).expect("copied"),
        &Node::Int(8080)
    );
}
