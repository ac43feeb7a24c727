//! Untyped document tree.
//!
//! A [`Node`] is whatever the decoder produced: a mapping, a sequence, or a
//! scalar leaf. Containers keep their children behind an `Arc`, so cloning a
//! node is cheap and an edit only reallocates the containers on the path it
//! touches. Everything else stays shared with the input document.

mod codec;
mod mapping;

pub use mapping::Mapping;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One value in a document tree.
#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Sequence),
    Mapping(Mapping),
}

/// Ordered list of nodes with shared storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    items: Arc<Vec<Node>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    /// Copy with `items[index]` swapped for `value`. Caller checks bounds.
    pub(crate) fn with_item(&self, index: usize, value: Node) -> Self {
        let mut items = self.items.as_ref().clone();
        items[index] = value;
        Self::from(items)
    }

    pub(crate) fn with_pushed(&self, value: Node) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(value);
        Self::from(items)
    }

    pub(crate) fn without(&self, index: usize) -> Self {
        let mut items = self.items.as_ref().clone();
        items.remove(index);
        Self::from(items)
    }

    /// Whether both sequences share the same backing storage.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl From<Vec<Node>> for Sequence {
    fn from(items: Vec<Node>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl FromIterator<Node> for Sequence {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Node {
    /// Human-readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Node::Sequence(_) | Node::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether `self` and `other` are the same allocation (containers only).
    ///
    /// Scalars never share storage, so this is `false` for them.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Sequence(a), Node::Sequence(b)) => a.ptr_eq(b),
            (Node::Mapping(a), Node::Mapping(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Int(a), Node::Int(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Sequence(a), Node::Sequence(b)) => a.ptr_eq(b) || a == b,
            (Node::Mapping(a), Node::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

/// Agrees with `==`: `0.0` and `-0.0` hash alike, every NaN hashes alike, and
/// a mapping hashes by size only because its equality ignores order.
impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Node::Null => {}
            Node::Bool(b) => b.hash(state),
            Node::Int(i) => i.hash(state),
            Node::Float(x) => {
                let bits = if *x == 0.0 {
                    0
                } else if x.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    x.to_bits()
                };
                bits.hash(state);
            }
            Node::String(s) => s.hash(state),
            Node::Sequence(seq) => {
                seq.len().hash(state);
                for item in seq {
                    item.hash(state);
                }
            }
            Node::Mapping(map) => map.len().hash(state),
        }
    }
}

/// Short single-line rendering for diagnostics.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Int(i) => write!(f, "{i}"),
            Node::Float(x) => write!(f, "{x}"),
            Node::String(s) => write!(f, "'{s}'"),
            Node::Sequence(seq) => write!(f, "<sequence of {}>", seq.len()),
            Node::Mapping(map) => write!(f, "<mapping of {}>", map.len()),
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(i64::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(Sequence::from(items))
    }
}

impl From<Sequence> for Node {
    fn from(seq: Sequence) -> Self {
        Node::Sequence(seq)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

/// Build a sequence node from anything convertible to nodes.
///
/// ```
/// use doc_patcher::node::seq;
///
/// let doc = seq([1, 2, 3]);
/// assert_eq!(doc.as_sequence().map(|s| s.len()), Some(3));
/// ```
pub fn seq<T: Into<Node>>(items: impl IntoIterator<Item = T>) -> Node {
    Node::Sequence(items.into_iter().map(Into::into).collect())
}

/// Build a mapping node from key/value pairs. Later duplicates overwrite
/// earlier ones.
pub fn map<K: Into<Node>, V: Into<Node>>(entries: impl IntoIterator<Item = (K, V)>) -> Node {
    Node::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    )
}
