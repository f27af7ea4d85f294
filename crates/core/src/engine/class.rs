//! Engine for concrete class types: children are the accessible fields.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use propscope_api::{Suggestion, TypeRef};
use tracing::debug;

use crate::engine::{ChildHelper, QueryCtx};
use crate::node::SuggestionNode;
use crate::trie::PrefixTrie;
use crate::util::sanitize;

/// One accessible field, keyed by its sanitized name.
#[derive(Debug)]
pub struct FieldChild {
    pub original_name: String,
    pub sanitized: String,
    pub ty: TypeRef,
}

#[derive(Debug)]
struct ClassIndex {
    lookup: HashMap<String, Arc<FieldChild>>,
    trie: PrefixTrie<Arc<FieldChild>>,
}

#[derive(Debug)]
pub struct ClassMetadata {
    ty: TypeRef,
    // None once initialized means the type exposes no resolvable children.
    index: OnceCell<Option<ClassIndex>>,
}

impl ClassMetadata {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            index: OnceCell::new(),
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    fn index(&self, cx: &QueryCtx) -> Option<&ClassIndex> {
        self.index
            .get_or_init(|| build_index(cx, &self.ty))
            .as_ref()
    }

    pub fn has_children(&self, cx: &QueryCtx) -> bool {
        self.index(cx).is_some_and(|idx| !idx.trie.is_empty())
    }

    pub fn find_direct_child(&self, cx: &QueryCtx, name: &str) -> Option<ChildHelper> {
        let child = self.index(cx)?.lookup.get(&sanitize(name))?;
        Some(ChildHelper::field(Arc::clone(child), self.ty.clone()))
    }

    pub fn find_children_for_prefix(
        &self,
        cx: &QueryCtx,
        prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<Vec<ChildHelper>> {
        let index = self.index(cx)?;
        let helpers = index
            .trie
            .prefix_values(&sanitize(prefix))
            .into_iter()
            .filter(|child| !is_excluded(exclude, &child.sanitized))
            .map(|child| ChildHelper::field(Arc::clone(child), self.ty.clone()))
            .collect();
        Some(helpers)
    }

    pub fn find_deepest(
        &self,
        cx: &QueryCtx,
        chain: &mut Vec<SuggestionNode>,
        segments: &[String],
        start: usize,
    ) -> usize {
        let Some(child) = self.find_direct_child(cx, &segments[start]) else {
            return start;
        };
        let child_ty = child.field_type().cloned();
        chain.push(child.to_node());
        let consumed = start + 1;
        if consumed >= segments.len() {
            return consumed;
        }
        match child_ty.and_then(|ty| cx.metadata(&ty)) {
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
        // Intermediate segments must resolve exactly before prefix-matching
        // the last one.
        let child = self.find_direct_child(cx, &query_segments[start])?;
        let child_ty = child.field_type().cloned()?;
        let meta = cx.metadata(&child_ty)?;
        if meta.is_terminal() {
            return None;
        }
        let mut extended = chain.to_vec();
        extended.push(child.to_node());
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

pub(super) fn is_excluded(exclude: Option<&HashSet<String>>, sanitized: &str) -> bool {
    exclude.is_some_and(|set| set.contains(sanitized))
}

fn build_index(cx: &QueryCtx, ty: &TypeRef) -> Option<ClassIndex> {
    let mut lookup = HashMap::new();
    let mut trie = PrefixTrie::new();
    for field in cx.host.fields(ty) {
        if !field.accessible() {
            continue;
        }
        let sanitized = sanitize(&field.name);
        if sanitized.is_empty() {
            debug!(field = %field.name, ty = %ty.canonical_name(), "field name sanitizes to empty, skipping");
            continue;
        }
        let child = Arc::new(FieldChild {
            original_name: field.name.clone(),
            sanitized: sanitized.clone(),
            ty: field.ty.clone(),
        });
        if !trie.insert_if_absent(&sanitized, Arc::clone(&child)) {
            debug!(field = %field.name, key = %sanitized, "sanitized name collision, keeping first");
            continue;
        }
        lookup.insert(sanitized, child);
    }
    if trie.is_empty() {
        return None;
    }
    Some(ClassIndex { lookup, trie })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::sanitize;

    #[test]
    fn exclusion_matches_on_sanitized_form() {
        let mut set = HashSet::new();
        set.insert(sanitize("host-name"));
        assert!(is_excluded(Some(&set), "hostname"));
        assert!(!is_excluded(Some(&set), "hostport"));
        assert!(!is_excluded(None, "hostname"));
    }
}
