use crate::node::Node;
use crate::ops::errors::OpsError;
use crate::ops::Op;
use tracing::{debug, warn};

/// Ordered list of operations applied left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ops(Vec<Op>);

impl Ops {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: impl Into<Op>) {
        self.0.push(op.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.0.iter()
    }

    /// Thread `doc` through every operation.
    ///
    /// Stops at the first failure; nothing from the partially patched
    /// document is returned. `doc` itself is never modified.
    pub fn apply(&self, doc: &Node) -> Result<Node, OpsError> {
        let mut current = doc.clone();

        for (index, op) in self.0.iter().enumerate() {
            debug!(index, op = op.type_name(), "applying operation");
            current = op.apply(&current).map_err(|source| {
                warn!(index, op = op.type_name(), error = %source, "operation failed");
                OpsError {
                    index,
                    op: op.type_name(),
                    source,
                }
            })?;
        }

        Ok(current)
    }
}

impl From<Vec<Op>> for Ops {
    fn from(ops: Vec<Op>) -> Self {
        Self(ops)
    }
}

impl FromIterator<Op> for Ops {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Ops {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ops {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
