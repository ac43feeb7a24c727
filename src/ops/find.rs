use crate::node::{Node, Sequence};
use crate::ops::errors::PatchError;
use crate::pointer::{Pointer, Token};

/// Read-only lookup. Not a standalone operation in an [`Ops`](super::Ops)
/// list; copy, move and test are built on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FindOp {
    pub path: Pointer,
}

impl FindOp {
    pub fn new(path: Pointer) -> Self {
        Self { path }
    }

    pub fn apply<'a>(&self, doc: &'a Node) -> Result<&'a Node, PatchError> {
        find(doc, &self.path)
    }
}

/// Resolve `pointer` against `doc` without modifying anything.
///
/// The returned reference points into `doc`; clone it to keep a shared handle
/// on the subtree.
pub fn find<'a>(doc: &'a Node, pointer: &Pointer) -> Result<&'a Node, PatchError> {
    let mut current = doc;
    for (depth, token) in pointer.tokens().iter().enumerate() {
        current = step(current, pointer, depth, token)?;
    }
    Ok(current)
}

fn step<'a>(
    node: &'a Node,
    pointer: &Pointer,
    depth: usize,
    token: &Token,
) -> Result<&'a Node, PatchError> {
    let text = match token {
        Token::Append => {
            return Err(PatchError::InvalidUseOfAppend {
                path: pointer.prefix(depth + 1),
                op: "find",
            });
        }
        Token::Segment { text, .. } => text,
    };

    match node {
        Node::Mapping(map) => match map.position_of_segment(text) {
            Some(position) => Ok(map.value_at(position)),
            None => Err(PatchError::key_not_found(
                pointer.prefix(depth + 1),
                text,
                map,
            )),
        },
        Node::Sequence(seq) => {
            let index = sequence_index(seq, pointer, depth, token)?;
            Ok(&seq.as_slice()[index])
        }
        scalar => Err(expected_container(pointer, depth, scalar)),
    }
}

/// Read `token` as an index into `seq`, checking both shape and bounds.
pub(crate) fn sequence_index(
    seq: &Sequence,
    pointer: &Pointer,
    depth: usize,
    token: &Token,
) -> Result<usize, PatchError> {
    let index = token.as_index().ok_or_else(|| PatchError::InvalidIndex {
        path: pointer.prefix(depth + 1),
        segment: token.to_string(),
    })?;

    if index >= seq.len() {
        return Err(PatchError::IndexOutOfRange {
            path: pointer.prefix(depth + 1),
            index,
            len: seq.len(),
        });
    }

    Ok(index)
}

pub(crate) fn expected_container(pointer: &Pointer, depth: usize, found: &Node) -> PatchError {
    PatchError::ExpectedContainer {
        path: pointer.prefix(depth),
        found: found.kind(),
    }
}
