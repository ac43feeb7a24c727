use crate::node::Node;
use crate::ops::errors::PatchError;
use crate::ops::find::{expected_container, sequence_index};
use crate::pointer::{Pointer, Token};

/// Set the node at `path` to `value`.
///
/// A final `-` appends to a sequence. A final optional segment (`/key?`)
/// inserts a missing mapping key instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceOp {
    pub path: Pointer,
    pub value: Node,
}

impl ReplaceOp {
    pub fn new(path: Pointer, value: impl Into<Node>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        replace(doc, &self.path, self.value.clone())
    }
}

/// Copy-on-write replace. Only the containers between the root and the
/// target are rebuilt; every other subtree is shared with `doc`.
pub fn replace(doc: &Node, pointer: &Pointer, value: Node) -> Result<Node, PatchError> {
    replace_at(doc, pointer, 0, value)
}

fn replace_at(node: &Node, pointer: &Pointer, depth: usize, value: Node) -> Result<Node, PatchError> {
    let tokens = pointer.tokens();
    let Some(token) = tokens.get(depth) else {
        return Ok(value);
    };
    let is_last = depth + 1 == tokens.len();

    match node {
        Node::Mapping(map) => {
            let (text, optional) = match token {
                Token::Segment { text, optional } => (text, *optional),
                Token::Append => {
                    return Err(PatchError::ExpectedKey {
                        path: pointer.prefix(depth + 1),
                    });
                }
            };

            match map.position_of_segment(text) {
                Some(position) => {
                    let child = replace_at(map.value_at(position), pointer, depth + 1, value)?;
                    Ok(Node::Mapping(map.with_value_at(position, child)))
                }
                None if is_last && optional => Ok(Node::Mapping(
                    map.with_appended(Node::String(text.clone()), value),
                )),
                None => Err(PatchError::key_not_found(
                    pointer.prefix(depth + 1),
                    text,
                    map,
                )),
            }
        }
        Node::Sequence(seq) => {
            if let Token::Append = token {
                if !is_last {
                    return Err(PatchError::InvalidUseOfAppend {
                        path: pointer.prefix(depth + 1),
                        op: "replace before the last segment",
                    });
                }
                return Ok(Node::Sequence(seq.with_pushed(value)));
            }

            let index = sequence_index(seq, pointer, depth, token)?;
            let child = replace_at(&seq.as_slice()[index], pointer, depth + 1, value)?;
            Ok(Node::Sequence(seq.with_item(index, child)))
        }
        scalar => Err(expected_container(pointer, depth, scalar)),
    }
}
