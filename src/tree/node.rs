//! Index node types and their JSON shape

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Leaf pointer to a data file, relative to the indexed root.
///
/// Serializes as `{"$ref": "<path>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub path: String,
}

impl Reference {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Value stored under a key of an [`IndexNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexEntry {
    Reference(Reference),
    Node(IndexNode),
}

/// One directory's contents: entry name -> reference or nested node.
///
/// Keys are kept sorted so the serialized document is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexNode {
    entries: BTreeMap<String, IndexEntry>,
}

impl IndexNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, entry: IndexEntry) -> Option<IndexEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, IndexEntry> {
        self.entries.iter()
    }

    /// Every reference in this subtree, depth first in key order.
    pub fn references(&self) -> Vec<&Reference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Reference>) {
        for entry in self.entries.values() {
            match entry {
                IndexEntry::Reference(reference) => out.push(reference),
                IndexEntry::Node(child) => child.collect_references(out),
            }
        }
    }

    /// Number of nested directory nodes below this one.
    pub fn directory_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| match entry {
                IndexEntry::Reference(_) => 0,
                IndexEntry::Node(child) => 1 + child.directory_count(),
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a IndexNode {
    type Item = (&'a String, &'a IndexEntry);
    type IntoIter = btree_map::Iter<'a, String, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
