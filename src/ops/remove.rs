use crate::node::Node;
use crate::ops::errors::PatchError;
use crate::ops::find::{expected_container, sequence_index};
use crate::pointer::{Pointer, Token};
use tracing::debug;

/// Delete the node at `path`. Sequence elements after it shift down.
///
/// An optional final segment (`/key?`) turns a missing key into a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOp {
    pub path: Pointer,
}

impl RemoveOp {
    pub fn new(path: Pointer) -> Self {
        Self { path }
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        remove(doc, &self.path)
    }
}

pub fn remove(doc: &Node, pointer: &Pointer) -> Result<Node, PatchError> {
    if pointer.is_root() {
        return Err(PatchError::CannotRemoveRoot);
    }
    remove_at(doc, pointer, 0)
}

fn remove_at(node: &Node, pointer: &Pointer, depth: usize) -> Result<Node, PatchError> {
    let tokens = pointer.tokens();
    let token = &tokens[depth];
    let is_last = depth + 1 == tokens.len();

    let (text, optional) = match token {
        Token::Segment { text, optional } => (text, *optional),
        Token::Append => {
            return Err(PatchError::InvalidUseOfAppend {
                path: pointer.prefix(depth + 1),
                op: "remove",
            });
        }
    };

    match node {
        Node::Mapping(map) => match map.position_of_segment(text) {
            Some(position) if is_last => Ok(Node::Mapping(map.without_at(position))),
            Some(position) => {
                let child = remove_at(map.value_at(position), pointer, depth + 1)?;
                Ok(Node::Mapping(map.with_value_at(position, child)))
            }
            None if is_last && optional => {
                debug!(path = %pointer, "optional key already absent, nothing to remove");
                Ok(node.clone())
            }
            None => Err(PatchError::key_not_found(
                pointer.prefix(depth + 1),
                text,
                map,
            )),
        },
        Node::Sequence(seq) => {
            let index = sequence_index(seq, pointer, depth, token)?;
            if is_last {
                return Ok(Node::Sequence(seq.without(index)));
            }
            let child = remove_at(&seq.as_slice()[index], pointer, depth + 1)?;
            Ok(Node::Sequence(seq.with_item(index, child)))
        }
        scalar => Err(expected_container(pointer, depth, scalar)),
    }
}
