use crate::node::Node;
use crate::ops::errors::PatchError;
use crate::ops::Op;
use tracing::debug;

/// Wraps an operation and swaps its failure for an operator-written message.
///
/// Success passes through unchanged. The failure itself is never suppressed.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveOp {
    pub op: Box<Op>,
    pub error_msg: String,
}

impl DescriptiveOp {
    /// Wrapping an already descriptive operation replaces its message.
    pub fn new(op: impl Into<Op>, error_msg: impl Into<String>) -> Self {
        let op = match op.into() {
            Op::Descriptive(inner) => inner.op,
            other => Box::new(other),
        };
        Self {
            op,
            error_msg: error_msg.into(),
        }
    }

    pub fn apply(&self, doc: &Node) -> Result<Node, PatchError> {
        self.op.apply(doc).map_err(|err| {
            debug!(error = %err, message = %self.error_msg, "replacing operation error");
            PatchError::Described {
                message: self.error_msg.clone(),
            }
        })
    }
}
