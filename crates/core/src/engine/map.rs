//! Engine for map types.
//!
//! A map has two tracks: the key track (suggestible only when the key type is
//! an enum; free-form otherwise) and the value track, reached through a
//! resolved entry node. Any literal segment is accepted as an entry key
//! unless the key type is an enum, in which case it must name a constant.

use std::collections::{BTreeSet, HashSet};

use propscope_api::{Suggestion, TypeRef};

use crate::engine::{ChildHelper, QueryCtx, TypeMetadata};
use crate::node::{MapEntryNode, SuggestionNode};

#[derive(Debug)]
pub struct MapMetadata {
    ty: TypeRef,
    key: TypeRef,
    value: TypeRef,
}

impl MapMetadata {
    pub fn new(ty: TypeRef, key: TypeRef, value: TypeRef) -> Self {
        Self { ty, key, value }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    pub fn key_type(&self) -> &TypeRef {
        &self.key
    }

    pub fn value_type(&self) -> &TypeRef {
        &self.value
    }

    pub fn find_direct_child(&self, cx: &QueryCtx, name: &str) -> Option<ChildHelper> {
        match &*cx.metadata(&self.key)? {
            TypeMetadata::Enum(keys) => keys.find_direct_child(cx, name),
            _ => None,
        }
    }

    pub fn find_children_for_prefix(
        &self,
        cx: &QueryCtx,
        prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<Vec<ChildHelper>> {
        match &*cx.metadata(&self.key)? {
            TypeMetadata::Enum(keys) => keys.find_children_for_prefix(cx, prefix, exclude),
            _ => None,
        }
    }

    /// Resolve one segment as an entry key, canonicalizing enum-typed keys to
    /// their declared constant spelling. `None` rejects the segment.
    fn entry_key(&self, cx: &QueryCtx, segment: &str) -> Option<String> {
        match cx.metadata(&self.key).as_deref() {
            Some(TypeMetadata::Enum(keys)) => Some(
                keys.find_direct_child(cx, segment)?
                    .original_name()
                    .to_string(),
            ),
            _ => Some(segment.to_string()),
        }
    }

    fn entry_node(&self, key_text: String) -> SuggestionNode {
        SuggestionNode::MapEntry(MapEntryNode {
            key_text,
            map: self.ty.clone(),
            value: self.value.clone(),
        })
    }

    pub fn find_deepest(
        &self,
        cx: &QueryCtx,
        chain: &mut Vec<SuggestionNode>,
        segments: &[String],
        start: usize,
    ) -> usize {
        let Some(key_text) = self.entry_key(cx, &segments[start]) else {
            return start;
        };
        chain.push(self.entry_node(key_text));
        let consumed = start + 1;
        if consumed >= segments.len() {
            return consumed;
        }
        match cx.metadata(&self.value) {
            Some(meta) if !meta.is_terminal() => meta.find_deepest(cx, chain, segments, consumed),
            _ => consumed,
        }
    }

    pub fn key_suggestions(
        &self,
        cx: &QueryCtx,
        chain: &[SuggestionNode],
        num_of_ancestors: usize,
        query_segments: &[String],
        start: usize,
        exclude: Option<&HashSet<String>>,
    ) -> Option<BTreeSet<Suggestion>> {
        if start + 1 == query_segments.len() {
            let helpers = self.find_children_for_prefix(cx, &query_segments[start], exclude)?;
            return Some(
                helpers
                    .iter()
                    .map(|h| h.build_suggestion_for_key(cx, chain, num_of_ancestors))
                    .collect(),
            );
        }
        let key_text = self.entry_key(cx, &query_segments[start])?;
        let meta = cx.metadata(&self.value)?;
        if meta.is_terminal() {
            return None;
        }
        let mut extended = chain.to_vec();
        extended.push(self.entry_node(key_text));
        meta.key_suggestions(
            cx,
            &extended,
            num_of_ancestors,
            query_segments,
            start + 1,
            exclude,
        )
    }
}
