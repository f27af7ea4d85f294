//! Byte-wise prefix trie backing the per-type metadata indexes.
//!
//! Keys are sanitized names (see [`crate::util::sanitize`]); children are
//! kept in a `BTreeMap` so prefix scans yield values in lexical key order.

use std::collections::BTreeMap;

#[derive(Debug)]
pub struct PrefixTrie<V> {
    root: TrieNode<V>,
    len: usize,
}

#[derive(Debug)]
struct TrieNode<V> {
    children: BTreeMap<u8, TrieNode<V>>,
    value: Option<V>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

impl<V> Default for PrefixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixTrie<V> {
    pub fn new() -> Self {
        Self {
            root: TrieNode::default(),
            len: 0,
        }
    }

    /// Insert `value` under `key` unless the key is already taken.
    ///
    /// Returns false (keeping the existing value) on collision; this is how
    /// the first-seen-wins policy for sanitization collisions is enforced.
    pub fn insert_if_absent(&mut self, key: &str, value: V) -> bool {
        let mut node = &mut self.root;
        for b in key.bytes() {
            node = node.children.entry(b).or_default();
        }
        if node.value.is_some() {
            return false;
        }
        node.value = Some(value);
        self.len += 1;
        true
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.descend(key)?.value.as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every value whose key starts with `prefix`, in lexical key order.
    pub fn prefix_values(&self, prefix: &str) -> Vec<&V> {
        let mut out = Vec::new();
        if let Some(node) = self.descend(prefix) {
            collect_values(node, &mut out);
        }
        out
    }

    /// All keys currently present, in lexical order.
    pub fn keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut buf = Vec::new();
        collect_keys(&self.root, &mut buf, &mut out);
        out
    }

    fn descend(&self, key: &str) -> Option<&TrieNode<V>> {
        let mut node = &self.root;
        for b in key.bytes() {
            node = node.children.get(&b)?;
        }
        Some(node)
    }
}

fn collect_values<'a, V>(node: &'a TrieNode<V>, out: &mut Vec<&'a V>) {
    if let Some(value) = &node.value {
        out.push(value);
    }
    for child in node.children.values() {
        collect_values(child, out);
    }
}

fn collect_keys<V>(node: &TrieNode<V>, buf: &mut Vec<u8>, out: &mut Vec<String>) {
    if node.value.is_some() {
        out.push(String::from_utf8_lossy(buf).into_owned());
    }
    for (byte, child) in &node.children {
        buf.push(*byte);
        collect_keys(child, buf, out);
        buf.pop();
    }
}
