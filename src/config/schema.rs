use crate::node::Node;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Flat operation descriptor as it appears in an operations file.
///
/// ```yaml
/// - type: replace
///   path: /instance_groups/0/instances
///   value: 3
/// - type: test
///   path: /debug
///   absent: true
///   error: debug must not be configured
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub op_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// `Some(Node::Null)` for an explicit `value: null`, `None` when the field
    /// is missing.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    Node::deserialize(deserializer).map(Some)
}

/// Operation kinds accepted in a descriptor's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    Replace,
    Remove,
    Test,
    Copy,
    Move,
    QuietCopy,
    QuietMove,
}

/// Discriminator table. `None` marks a name that is recognised but not
/// accepted as a list operation.
const OP_TYPES: &[(&str, Option<OpType>)] = &[
    ("replace", Some(OpType::Replace)),
    ("remove", Some(OpType::Remove)),
    ("test", Some(OpType::Test)),
    ("copy", Some(OpType::Copy)),
    ("move", Some(OpType::Move)),
    ("qcopy", Some(OpType::QuietCopy)),
    ("qmove", Some(OpType::QuietMove)),
    // lookup only exists as a step inside copy, move and test
    ("find", None),
];

impl OpType {
    pub fn lookup(name: &str) -> Option<OpType> {
        OP_TYPES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .and_then(|(_, op_type)| *op_type)
    }

    pub fn name(self) -> &'static str {
        OP_TYPES
            .iter()
            .find(|(_, op_type)| *op_type == Some(self))
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Names that [`OpType::lookup`] accepts.
    pub fn accepted_names() -> Vec<String> {
        OP_TYPES
            .iter()
            .filter(|(_, op_type)| op_type.is_some())
            .map(|(name, _)| (*name).to_string())
            .collect()
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
