//! Conversion between [`OpDefinition`] records and [`Ops`].

use crate::config::schema::{OpDefinition, OpType};
use crate::node::Node;
use crate::ops::errors::closest;
use crate::ops::{
    CopyOp, DescriptiveOp, Expected, MoveOp, Op, Ops, QuietCopyOp, QuietMoveOp, RemoveOp,
    ReplaceOp, TestOp,
};
use crate::pointer::{Pointer, PointerError};
use thiserror::Error;

/// Placeholder shown instead of a descriptor's `value` in diagnostics.
pub const REDACTED: &str = "<redacted>";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("{op_type} operation [{index}]: {issue} within\n{rendered}")]
    Invalid {
        index: usize,
        op_type: OpType,
        issue: DefinitionIssue,
        rendered: String,
    },

    #[error("unknown operation [{index}] with type '{op_type}'{} within\n{rendered}", suggestion_hint(.suggestion))]
    Unknown {
        index: usize,
        op_type: String,
        suggestion: Option<String>,
        rendered: String,
    },
}

impl DefinitionError {
    /// Position of the offending descriptor in the input list.
    pub fn index(&self) -> usize {
        match self {
            DefinitionError::Invalid { index, .. } | DefinitionError::Unknown { index, .. } => {
                *index
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionIssue {
    #[error("missing path")]
    MissingPath,
    #[error("missing from")]
    MissingFrom,
    #[error("missing value")]
    MissingValue,
    #[error("missing value or absent")]
    MissingValueOrAbsent,
    #[error("cannot specify value")]
    UnexpectedValue,
    #[error("invalid path: {}", .0.message())]
    InvalidPath(PointerError),
    #[error("invalid from: {}", .0.message())]
    InvalidFrom(PointerError),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

/// Build an operation list, failing on the first invalid descriptor.
pub fn ops_from_definitions(definitions: &[OpDefinition]) -> Result<Ops, DefinitionError> {
    definitions
        .iter()
        .enumerate()
        .map(|(index, definition)| parse_definition(index, definition))
        .collect()
}

fn parse_definition(index: usize, definition: &OpDefinition) -> Result<Op, DefinitionError> {
    let Some(op_type) = OpType::lookup(&definition.op_type) else {
        return Err(DefinitionError::Unknown {
            index,
            op_type: definition.op_type.clone(),
            suggestion: closest(&definition.op_type, &OpType::accepted_names()),
            rendered: render_redacted(definition),
        });
    };

    let op = build_op(op_type, definition).map_err(|issue| DefinitionError::Invalid {
        index,
        op_type,
        issue,
        rendered: render_redacted(definition),
    })?;

    Ok(match &definition.error {
        Some(message) => Op::Descriptive(DescriptiveOp::new(op, message.clone())),
        None => op,
    })
}

fn build_op(op_type: OpType, definition: &OpDefinition) -> Result<Op, DefinitionIssue> {
    let path = definition.path.as_deref().ok_or(DefinitionIssue::MissingPath)?;

    match op_type {
        OpType::Replace => {
            let value = definition.value.clone().ok_or(DefinitionIssue::MissingValue)?;
            Ok(ReplaceOp::new(parse_path(path)?, value).into())
        }
        OpType::Remove => {
            if definition.value.is_some() {
                return Err(DefinitionIssue::UnexpectedValue);
            }
            Ok(RemoveOp::new(parse_path(path)?).into())
        }
        OpType::Test => {
            // `absent: true` wins over a value; `absent: false` alone asserts null
            let expected = match (definition.absent, &definition.value) {
                (Some(true), _) => Expected::Absent,
                (_, Some(value)) => Expected::Value(value.clone()),
                (Some(false), None) => Expected::Value(Node::Null),
                (None, None) => return Err(DefinitionIssue::MissingValueOrAbsent),
            };
            Ok(TestOp {
                path: parse_path(path)?,
                expected,
            }
            .into())
        }
        OpType::Copy | OpType::Move | OpType::QuietCopy | OpType::QuietMove => {
            let from = definition.from.as_deref().ok_or(DefinitionIssue::MissingFrom)?;
            if definition.value.is_some() {
                return Err(DefinitionIssue::UnexpectedValue);
            }
            let path = parse_path(path)?;
            let from = Pointer::parse(from).map_err(DefinitionIssue::InvalidFrom)?;
            Ok(match op_type {
                OpType::Copy => CopyOp::new(path, from).into(),
                OpType::Move => MoveOp::new(path, from).into(),
                OpType::QuietCopy => QuietCopyOp::new(path, from).into(),
                _ => QuietMoveOp::new(path, from).into(),
            })
        }
    }
}

fn parse_path(path: &str) -> Result<Pointer, DefinitionIssue> {
    Pointer::parse(path).map_err(DefinitionIssue::InvalidPath)
}

/// Pretty JSON rendering of a descriptor with its value masked.
///
/// Works on a copy; `definition` is left as is.
pub fn render_redacted(definition: &OpDefinition) -> String {
    let mut shown = definition.clone();
    if shown.value.is_some() {
        shown.value = Some(Node::String(REDACTED.to_string()));
    }

    match serde_json::to_string_pretty(&shown) {
        // undo HTML-safe escaping some encoders apply to the placeholder
        Ok(text) => text.replace("\\u003c", "<").replace("\\u003e", ">"),
        Err(_) => "<unknown>".to_string(),
    }
}

/// Descriptor form of every operation, in order.
pub fn definitions_from_ops(ops: &Ops) -> Vec<OpDefinition> {
    ops.iter().map(definition_from_op).collect()
}

fn definition_from_op(op: &Op) -> OpDefinition {
    let mut definition = OpDefinition {
        op_type: op.type_name().to_string(),
        ..Default::default()
    };

    match op {
        Op::Replace(op) => {
            definition.path = Some(op.path.to_string());
            definition.value = Some(op.value.clone());
        }
        Op::Remove(op) => {
            definition.path = Some(op.path.to_string());
        }
        Op::Test(op) => {
            definition.path = Some(op.path.to_string());
            match &op.expected {
                Expected::Value(value) => definition.value = Some(value.clone()),
                Expected::Absent => definition.absent = Some(true),
            }
        }
        Op::Copy(CopyOp { path, from })
        | Op::Move(MoveOp { path, from })
        | Op::QuietCopy(QuietCopyOp { path, from })
        | Op::QuietMove(QuietMoveOp { path, from }) => {
            definition.path = Some(path.to_string());
            definition.from = Some(from.to_string());
        }
        Op::Descriptive(op) => {
            definition = definition_from_op(&op.op);
            definition.error = Some(op.error_msg.clone());
        }
    }

    definition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(op_type: &str) -> OpDefinition {
        OpDefinition {
            op_type: op_type.to_string(),
            ..Default::default()
        }
    }

    fn ptr(text: &str) -> Pointer {
        Pointer::parse(text).unwrap()
    }

    #[test]
    fn parses_every_supported_type() {
        let defs = vec![
            OpDefinition {
                path: Some("/abc".into()),
                value: Some(Node::Int(123)),
                ..def("replace")
            },
            OpDefinition {
                path: Some("/abc".into()),
                ..def("remove")
            },
            OpDefinition {
                path: Some("/abc".into()),
                value: Some(Node::Int(123)),
                ..def("test")
            },
            OpDefinition {
                path: Some("/abc".into()),
                absent: Some(true),
                ..def("test")
            },
            OpDefinition {
                path: Some("/abc".into()),
                from: Some("/abc".into()),
                ..def("copy")
            },
            OpDefinition {
                path: Some("/abc".into()),
                from: Some("/abc".into()),
                ..def("move")
            },
            OpDefinition {
                path: Some("/abc".into()),
                from: Some("/abc".into()),
                ..def("qcopy")
            },
            OpDefinition {
                path: Some("/abc".into()),
                from: Some("/abc".into()),
                ..def("qmove")
            },
        ];

        let ops = ops_from_definitions(&defs).unwrap();
        let expected: Ops = vec![
            ReplaceOp::new(ptr("/abc"), 123).into(),
            RemoveOp::new(ptr("/abc")).into(),
            TestOp::value(ptr("/abc"), 123).into(),
            TestOp::absent(ptr("/abc")).into(),
            CopyOp::new(ptr("/abc"), ptr("/abc")).into(),
            MoveOp::new(ptr("/abc"), ptr("/abc")).into(),
            QuietCopyOp::new(ptr("/abc"), ptr("/abc")).into(),
            QuietMoveOp::new(ptr("/abc"), ptr("/abc")).into(),
        ]
        .into();
        assert_eq!(ops, expected);
    }

    #[test]
    fn error_field_wraps_in_descriptive_op() {
        let defs = vec![OpDefinition {
            path: Some("/abc".into()),
            value: Some(Node::Int(123)),
            error: Some("error".into()),
            ..def("replace")
        }];
        let ops = ops_from_definitions(&defs).unwrap();
        let expected: Ops =
            vec![DescriptiveOp::new(ReplaceOp::new(ptr("/abc"), 123), "error").into()].into();
        assert_eq!(ops, expected);
    }

    #[test]
    fn unknown_type_renders_descriptor() {
        let err = ops_from_definitions(&[def("op")]).unwrap_err();
        assert_eq!(err.index(), 0);
        assert_eq!(
            err.to_string(),
            "unknown operation [0] with type 'op' within\n{\n  \"type\": \"op\"\n}"
        );
    }

    #[test]
    fn find_is_rejected() {
        let err = ops_from_definitions(&[def("find")]).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("unknown operation [0] with type 'find'"));
    }

    #[test]
    fn unknown_type_suggests_close_match() {
        let err = ops_from_definitions(&[def("replce")]).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("unknown operation [0] with type 'replce' (did you mean 'replace'?)"));
    }

    #[test]
    fn value_is_redacted_in_errors() {
        let complex = crate::node::map([(123, 123)]);
        let defs = vec![OpDefinition {
            path: Some("abc".into()),
            value: Some(complex.clone()),
            ..def("op")
        }];
        let err = ops_from_definitions(&defs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown operation [0] with type 'op' within\n{\n  \"type\": \"op\",\n  \"path\": \"abc\",\n  \"value\": \"<redacted>\"\n}"
        );
        assert_eq!(defs[0].value, Some(complex));
    }

    #[test]
    fn reports_index_of_failing_descriptor() {
        let defs = vec![
            OpDefinition {
                path: Some("/abc".into()),
                ..def("remove")
            },
            def("replace"),
        ];
        let err = ops_from_definitions(&defs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "replace operation [1]: missing path within\n{\n  \"type\": \"replace\"\n}"
        );
    }

    #[test]
    fn replace_requires_value() {
        let err = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            ..def("replace")
        }])
        .unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::Invalid {
                issue: DefinitionIssue::MissingValue,
                ..
            }
        ));
    }

    #[test]
    fn replace_accepts_explicit_null() {
        let ops = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            value: Some(Node::Null),
            ..def("replace")
        }])
        .unwrap();
        let expected: Ops = vec![ReplaceOp::new(ptr("/abc"), Node::Null).into()].into();
        assert_eq!(ops, expected);
    }

    #[test]
    fn invalid_path_message() {
        let err = ops_from_definitions(&[OpDefinition {
            path: Some("abc".into()),
            value: Some(Node::Int(1)),
            ..def("replace")
        }])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "replace operation [0]: invalid path: expected to start with '/' within\n{\n  \"type\": \"replace\",\n  \"path\": \"abc\",\n  \"value\": \"<redacted>\"\n}"
        );
    }

    #[test]
    fn remove_rejects_value() {
        let err = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            value: Some(Node::Int(1)),
            ..def("remove")
        }])
        .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("remove operation [0]: cannot specify value within"));
    }

    #[test]
    fn test_requires_value_or_absent() {
        let err = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            ..def("test")
        }])
        .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("test operation [0]: missing value or absent within"));
        assert!(matches!(
            err,
            DefinitionError::Invalid {
                issue: DefinitionIssue::MissingValueOrAbsent,
                ..
            }
        ));
    }

    #[test]
    fn test_absent_false_without_value_asserts_null() {
        let ops = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            absent: Some(false),
            ..def("test")
        }])
        .unwrap();
        let expected: Ops = vec![TestOp::value(ptr("/abc"), Node::Null).into()].into();
        assert_eq!(ops, expected);

        let doc = crate::node::map([("abc", Node::Null)]);
        assert_eq!(ops.apply(&doc).unwrap(), doc);
        let doc = crate::node::map([("abc", 1)]);
        assert!(ops.apply(&doc).is_err());
    }

    #[test]
    fn test_absent_true_takes_precedence_over_value() {
        let ops = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            value: Some(Node::Int(1)),
            absent: Some(true),
            ..def("test")
        }])
        .unwrap();
        let expected: Ops = vec![TestOp::absent(ptr("/abc")).into()].into();
        assert_eq!(ops, expected);
    }

    #[test]
    fn test_value_with_absent_false_compares_value() {
        let ops = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            value: Some(Node::Int(1)),
            absent: Some(false),
            ..def("test")
        }])
        .unwrap();
        let expected: Ops = vec![TestOp::value(ptr("/abc"), 1).into()].into();
        assert_eq!(ops, expected);
    }

    #[test]
    fn transfer_field_checks() {
        let missing_from = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            ..def("move")
        }])
        .unwrap_err();
        assert!(missing_from
            .to_string()
            .starts_with("move operation [0]: missing from within"));

        let missing_path = ops_from_definitions(&[OpDefinition {
            from: Some("/abc".into()),
            ..def("qcopy")
        }])
        .unwrap_err();
        assert_eq!(
            missing_path.to_string(),
            "qcopy operation [0]: missing path within\n{\n  \"type\": \"qcopy\",\n  \"from\": \"/abc\"\n}"
        );

        let with_value = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            from: Some("/abc".into()),
            value: Some(Node::Int(1)),
            ..def("copy")
        }])
        .unwrap_err();
        assert!(with_value
            .to_string()
            .starts_with("copy operation [0]: cannot specify value within"));

        let bad_from = ops_from_definitions(&[OpDefinition {
            path: Some("/abc".into()),
            from: Some("abc".into()),
            ..def("qmove")
        }])
        .unwrap_err();
        assert!(bad_from
            .to_string()
            .starts_with("qmove operation [0]: invalid from: expected to start with '/' within"));
    }

    #[test]
    fn definitions_round_trip() {
        let ops: Ops = vec![
            ReplaceOp::new(ptr("/abc"), 123).into(),
            RemoveOp::new(ptr("/abc")).into(),
            TestOp::value(ptr("/abc"), 123).into(),
            TestOp::absent(ptr("/abc")).into(),
            CopyOp::new(ptr("/-"), ptr("/0")).into(),
            MoveOp::new(ptr("/def?"), ptr("/abc")).into(),
            QuietCopyOp::new(ptr("/x"), ptr("/y")).into(),
            QuietMoveOp::new(ptr("/x"), ptr("/y")).into(),
            DescriptiveOp::new(TestOp::absent(ptr("/z")), "z must not exist").into(),
        ]
        .into();

        let defs = definitions_from_ops(&ops);
        assert_eq!(defs[3].absent, Some(true));
        assert_eq!(defs[3].value, None);
        assert_eq!(defs[8].error.as_deref(), Some("z must not exist"));
        assert_eq!(ops_from_definitions(&defs).unwrap(), ops);
    }

    #[test]
    fn nested_descriptive_round_trips_with_outer_message() {
        let inner = DescriptiveOp::new(TestOp::absent(ptr("/z")), "inner");
        let ops: Ops = vec![DescriptiveOp::new(inner, "outer").into()].into();

        let defs = definitions_from_ops(&ops);
        assert_eq!(defs[0].error.as_deref(), Some("outer"));
        assert_eq!(ops_from_definitions(&defs).unwrap(), ops);
    }
}
