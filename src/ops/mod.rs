//! Patch operations over a [`Node`] tree.
//!
//! Every operation takes the current document by reference and returns a new
//! one. Containers on the edited path are rebuilt; everything else is shared
//! with the input, which stays valid and unchanged.

pub mod descriptive;
pub mod errors;
pub mod find;
pub mod remove;
pub mod replace;
pub mod sequence;
pub mod transfer;

pub use descriptive::DescriptiveOp;
pub use errors::{ErrorKind, OpsError, PatchError};
pub use find::{find, FindOp};
pub use remove::{remove, RemoveOp};
pub use replace::{replace, ReplaceOp};
pub use sequence::Ops;
pub use test::{Expected, TestOp};
pub use transfer::{CopyOp, MoveOp, QuietCopyOp, QuietMoveOp, SourcePolicy};

use crate::node::Node;

/// One unit of work in an [`Ops`] list.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Replace(ReplaceOp),
    Remove(RemoveOp),
    Test(TestOp),
    Copy(CopyOp),
    Move(MoveOp),
    QuietCopy(QuietCopyOp),
    QuietMove(QuietMoveOp),
    Descriptive(DescriptiveOp),
}

impl Op {
    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        match self {
            Op::Replace(op) => op.apply(doc),
            Op::Remove(op) => op.apply(doc),
            Op::Test(op) => op.apply(doc),
            Op::Copy(op) => op.apply(doc),
            Op::Move(op) => op.apply(doc),
            Op::QuietCopy(op) => op.apply(doc),
            Op::QuietMove(op) => op.apply(doc),
            Op::Descriptive(op) => op.apply(doc),
        }
    }

    /// Descriptor discriminator for this operation. A descriptive wrapper
    /// reports the type of the operation it wraps.
    pub fn type_name(&self) -> &'static str {
        match self {
            Op::Replace(_) => "replace",
            Op::Remove(_) => "remove",
            Op::Test(_) => "test",
            Op::Copy(_) => "copy",
            Op::Move(_) => "move",
            Op::QuietCopy(_) => "qcopy",
            Op::QuietMove(_) => "qmove",
            Op::Descriptive(op) => op.op.type_name(),
        }
    }
}

macro_rules! impl_from_op {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Op {
                fn from(op: $ty) -> Self {
                    Op::$variant(op)
                }
            }
        )*
    };
}

impl_from_op!(
    Replace(ReplaceOp),
    Remove(RemoveOp),
    Test(TestOp),
    Copy(CopyOp),
    Move(MoveOp),
    QuietCopy(QuietCopyOp),
    QuietMove(QuietMoveOp),
    Descriptive(DescriptiveOp),
);
