//! Copy and move, in strict and quiet flavours.
//!
//! All four are one algorithm: find `from`, replace at `path`, and for moves
//! remove the original `from` pointer from the already-updated document.
//! The quiet flavours keep their own type names in descriptors but fail the
//! same way on an unresolvable `from`.
//! An append at `path` never shifts an index below the old length, so `from`
//! still names the source element when the removal runs.

use crate::node::Node;
use crate::ops::errors::PatchError;
use crate::ops::find::find;
use crate::ops::remove::remove;
use crate::ops::replace::replace;
use crate::pointer::Pointer;
use tracing::debug;

/// Which descriptor family a transfer belongs to.
///
/// Both policies abort on any `from` lookup failure, a missing source
/// included. The policy is carried into the failure log only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePolicy {
    Strict,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Copy,
    Move,
}

fn transfer(
    doc: &Node,
    path: &Pointer,
    from: &Pointer,
    mode: Mode,
    policy: SourcePolicy,
) -> Result<Node, PatchError> {
    let value = match find(doc, from) {
        Ok(value) => value.clone(),
        Err(err) => {
            debug!(
                from = %from,
                path = %path,
                ?mode,
                ?policy,
                kind = ?err.kind(),
                "transfer source lookup failed"
            );
            return Err(err);
        }
    };

    let replaced = replace(doc, path, value)?;

    match mode {
        Mode::Copy => Ok(replaced),
        Mode::Move => remove(&replaced, from),
    }
}

macro_rules! transfer_op {
    ($(#[$meta:meta])* $name:ident, $mode:expr, $policy:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub path: Pointer,
            pub from: Pointer,
        }

        impl $name {
            pub fn new(path: Pointer, from: Pointer) -> Self {
                Self { path, from }
            }

            pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
                transfer(doc, &self.path, &self.from, $mode, $policy)
            }
        }
    };
}

transfer_op!(
    /// Duplicate the node at `from` into `path`.
    CopyOp,
    Mode::Copy,
    SourcePolicy::Strict
);
transfer_op!(
    /// Copy `from` to `path`, then remove `from`.
    MoveOp,
    Mode::Move,
    SourcePolicy::Strict
);
transfer_op!(
    /// Descriptor type `qcopy`; applies exactly like [`CopyOp`].
    QuietCopyOp,
    Mode::Copy,
    SourcePolicy::Quiet
);
transfer_op!(
    /// Descriptor type `qmove`; applies exactly like [`MoveOp`].
    QuietMoveOp,
    Mode::Move,
    SourcePolicy::Quiet
);
