//! Engine for enum types: children are the declared constants.
//!
//! Enum positions are terminal for key resolution; their children only ever
//! surface as *values* (or as literal map keys, through the map engine).

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use propscope_api::{MemberRef, Suggestion, TypeRef};
use tracing::debug;

use crate::classify;
use crate::engine::class::is_excluded;
use crate::engine::{ChildHelper, QueryCtx};
use crate::node::{self, SuggestionNode};
use crate::trie::PrefixTrie;
use crate::util::sanitize;

#[derive(Debug)]
pub struct ConstantChild {
    pub original_name: String,
    pub sanitized: String,
}

#[derive(Debug)]
struct EnumIndex {
    lookup: HashMap<String, Arc<ConstantChild>>,
    trie: PrefixTrie<Arc<ConstantChild>>,
}

#[derive(Debug)]
pub struct EnumMetadata {
    ty: TypeRef,
    index: OnceCell<Option<EnumIndex>>,
}

impl EnumMetadata {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            index: OnceCell::new(),
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    fn index(&self, cx: &QueryCtx) -> Option<&EnumIndex> {
        self.index
            .get_or_init(|| build_index(cx, &self.ty))
            .as_ref()
    }

    pub fn find_direct_child(&self, cx: &QueryCtx, name: &str) -> Option<ChildHelper> {
        let child = self.index(cx)?.lookup.get(&sanitize(name))?;
        Some(ChildHelper::constant(Arc::clone(child), self.ty.clone()))
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
            .map(|child| ChildHelper::constant(Arc::clone(child), self.ty.clone()))
            .collect();
        Some(helpers)
    }

    pub fn value_suggestions(
        &self,
        cx: &QueryCtx,
        chain: &[SuggestionNode],
        prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<BTreeSet<Suggestion>> {
        let index = self.index(cx)?;
        let names = node::original_names(chain);
        let short_type = self.ty.short_name();
        let set = index
            .trie
            .prefix_values(&sanitize(prefix))
            .into_iter()
            .filter(|child| !is_excluded(exclude, &child.sanitized))
            .map(|child| {
                let mut suggestion =
                    Suggestion::new_value(names.clone(), child.original_name.clone())
                        .with_short_type(short_type.clone());
                let member = MemberRef::EnumConstant {
                    declaring: self.ty.clone(),
                    name: child.original_name.clone(),
                };
                if let Some(doc) = cx.host.render_documentation(&member) {
                    suggestion = suggestion.with_description(doc);
                }
                suggestion
            })
            .collect();
        Some(set)
    }

    pub fn documentation_for_value(
        &self,
        cx: &QueryCtx,
        path_dot_delimited: &str,
        value: &str,
    ) -> Option<String> {
        let child = self.index(cx)?.lookup.get(&sanitize(value))?;
        let member = MemberRef::EnumConstant {
            declaring: self.ty.clone(),
            name: child.original_name.clone(),
        };
        let doc = cx.host.render_documentation(&member).unwrap_or_default();
        Some(format!(
            "<b>{path_dot_delimited}</b> = <b>{}</b>{doc}",
            child.original_name
        ))
    }
}

fn build_index(cx: &QueryCtx, ty: &TypeRef) -> Option<EnumIndex> {
    let constants = classify::enum_constants(cx.host, ty);
    let mut lookup = HashMap::new();
    let mut trie = PrefixTrie::new();
    for constant in constants {
        let sanitized = sanitize(&constant.name);
        if sanitized.is_empty() {
            debug!(constant = %constant.name, ty = %ty.canonical_name(), "constant name sanitizes to empty, skipping");
            continue;
        }
        let child = Arc::new(ConstantChild {
            original_name: constant.name.clone(),
            sanitized: sanitized.clone(),
        });
        if !trie.insert_if_absent(&sanitized, Arc::clone(&child)) {
            debug!(constant = %constant.name, key = %sanitized, "sanitized name collision, keeping first");
            continue;
        }
        lookup.insert(sanitized, child);
    }
    if trie.is_empty() {
        return None;
    }
    Some(EnumIndex { lookup, trie })
}
