use super::Node;
use indexmap::IndexMap;
use std::sync::Arc;

/// Key/value container with structurally unique keys.
///
/// Entries keep insertion order so that re-encoding a patched document stays
/// stable, but equality between mappings ignores order. Keys are hashed, so
/// lookups do not scan the entries.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Arc<IndexMap<Node, Node>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Node> {
        self.entries.keys()
    }

    pub fn get(&self, key: &Node) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &Node) -> bool {
        self.entries.contains_key(key)
    }

    /// Locate the entry a pointer segment addresses.
    ///
    /// An exact string key wins. Otherwise a scalar key whose textual form
    /// equals the segment matches, so `/1` reaches the integer key `1` of a
    /// YAML mapping. When several scalar keys print the same way, the first
    /// in document order is used.
    pub(crate) fn position_of_segment(&self, segment: &str) -> Option<usize> {
        if let Some(position) = self.entries.get_index_of(&Node::from(segment)) {
            return Some(position);
        }

        scalar_candidates(segment)
            .into_iter()
            .filter_map(|candidate| self.entries.get_full(&candidate))
            .filter(|(_, key, _)| scalar_key_text(key).as_deref() == Some(segment))
            .map(|(position, _, _)| position)
            .min()
    }

    pub(crate) fn value_at(&self, position: usize) -> &Node {
        &self.entries[position]
    }

    /// Copy with the value at `position` replaced. Caller checks bounds.
    pub(crate) fn with_value_at(&self, position: usize, value: Node) -> Self {
        let mut entries = self.entries.as_ref().clone();
        entries[position] = value;
        Self::from_index_map(entries)
    }

    /// Copy with a new trailing entry. Caller guarantees the key is absent.
    pub(crate) fn with_appended(&self, key: Node, value: Node) -> Self {
        let mut entries = IndexMap::with_capacity(self.entries.len() + 1);
        entries.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        entries.insert(key, value);
        Self::from_index_map(entries)
    }

    pub(crate) fn without_at(&self, position: usize) -> Self {
        let mut entries = self.entries.as_ref().clone();
        entries.shift_remove_index(position);
        Self::from_index_map(entries)
    }

    /// Set `key` to `value`, overwriting an existing entry in place.
    pub fn insert(&mut self, key: Node, value: Node) {
        Arc::make_mut(&mut self.entries).insert(key, value);
    }

    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Keys rendered for diagnostics, in document order.
    pub(crate) fn key_names(&self) -> Vec<String> {
        self.keys()
            .map(|k| scalar_key_text(k).unwrap_or_else(|| k.to_string()))
            .collect()
    }

    pub(crate) fn from_index_map(entries: IndexMap<Node, Node>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

fn scalar_key_text(key: &Node) -> Option<String> {
    match key {
        Node::String(s) => Some(s.clone()),
        Node::Int(i) => Some(i.to_string()),
        Node::Bool(b) => Some(b.to_string()),
        Node::Float(x) => Some(x.to_string()),
        Node::Null => Some("null".to_string()),
        Node::Sequence(_) | Node::Mapping(_) => None,
    }
}

/// Non-string scalars that could print as `segment`.
fn scalar_candidates(segment: &str) -> Vec<Node> {
    let mut candidates = Vec::new();
    if let Ok(i) = segment.parse::<i64>() {
        candidates.push(Node::Int(i));
    }
    if let Ok(x) = segment.parse::<f64>() {
        candidates.push(Node::Float(x));
    }
    match segment {
        "true" => candidates.push(Node::Bool(true)),
        "false" => candidates.push(Node::Bool(false)),
        "null" => candidates.push(Node::Null),
        _ => {}
    }
    candidates
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl Eq for Mapping {}

impl FromIterator<(Node, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Node, Node)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
