//! Query facade over the cache, resolver and engines.

use std::collections::HashSet;
use std::sync::Arc;

use propscope_api::{NodeKind, Suggestion, TypeIntrospector, TypeRef};
use tracing::trace;

use crate::cache::MetadataCache;
use crate::engine::{QueryCtx, TypeMetadata};
use crate::node;
use crate::resolve::{self, ResolvedPath};
use crate::util::sanitize;

/// Entry point for completion and documentation queries.
///
/// Holds the host handle and the engine cache; individual queries are
/// scoped by an `owner` string so callers can cache several independent
/// scopes side by side and invalidate them separately.
pub struct SuggestionService {
    host: Arc<dyn TypeIntrospector>,
    cache: MetadataCache,
}

impl SuggestionService {
    pub fn new(host: Arc<dyn TypeIntrospector>) -> Self {
        Self {
            host,
            cache: MetadataCache::new(),
        }
    }

    fn ctx<'a>(&'a self, owner: &'a str) -> QueryCtx<'a> {
        QueryCtx {
            host: self.host.as_ref(),
            cache: &self.cache,
            owner,
        }
    }

    /// Resolve a dotted path from `root`; partial chains are reported as-is.
    pub fn resolve_path(
        &self,
        owner: &str,
        root: &TypeRef,
        segments: &[String],
    ) -> Option<ResolvedPath> {
        let cx = self.ctx(owner);
        resolve::resolve_path(&cx, root, segments)
    }

    /// Kind of value sitting at the end of a fully resolved path.
    pub fn node_kind_at(&self, owner: &str, root: &TypeRef, segments: &[String]) -> NodeKind {
        let cx = self.ctx(owner);
        let Some(resolved) = resolve::resolve_path(&cx, root, segments) else {
            return NodeKind::Unknown;
        };
        if !resolved.is_complete() {
            return NodeKind::Unknown;
        }
        match resolved.deepest() {
            Some(node) => node.node_kind(&cx),
            None => root_kind(&cx, root),
        }
    }

    /// Key completions under `ancestors` for a (possibly dotted, possibly
    /// empty) `prefix`.
    ///
    /// `None` when the position offers no completions at all: unresolvable
    /// ancestors, a terminal position, or a keyspace the engines cannot
    /// enumerate. Suggestions come back ranked; siblings already present at
    /// the queried level are passed in `exclude` and never resurface, in any
    /// spelling that sanitizes to the same key.
    pub fn find_suggestions_for_prefix(
        &self,
        owner: &str,
        root: &TypeRef,
        ancestors: &[String],
        prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<Vec<Suggestion>> {
        let cx = self.ctx(owner);
        let resolved = resolve::resolve_path(&cx, root, ancestors)?;
        if !resolved.is_complete() {
            trace!(?ancestors, "ancestor path did not fully resolve");
            return None;
        }
        let meta = position_metadata(&cx, root, &resolved)?;
        if meta.is_terminal() {
            return None;
        }
        let segments: Vec<String> = prefix.split('.').map(str::to_string).collect();
        let exclude = exclude.map(sanitize_set);
        let set = meta.key_suggestions(
            &cx,
            &resolved.chain,
            resolved.chain.len(),
            &segments,
            0,
            exclude.as_ref(),
        )?;
        trace!(prefix, count = set.len(), "key suggestions");
        Some(set.into_iter().collect())
    }

    /// Value completions for the key at `path`.
    pub fn find_value_suggestions(
        &self,
        owner: &str,
        root: &TypeRef,
        path: &[String],
        value_prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<Vec<Suggestion>> {
        let cx = self.ctx(owner);
        let resolved = resolve::resolve_path(&cx, root, path)?;
        if !resolved.is_complete() {
            return None;
        }
        let meta = position_metadata(&cx, root, &resolved)?;
        let exclude = exclude.map(sanitize_set);
        let set = meta.value_suggestions(&cx, &resolved.chain, value_prefix, exclude.as_ref())?;
        trace!(value_prefix, count = set.len(), "value suggestions");
        Some(set.into_iter().collect())
    }

    /// Hover documentation for the key at `path`.
    pub fn documentation_for_path(
        &self,
        owner: &str,
        root: &TypeRef,
        path: &[String],
    ) -> Option<String> {
        let cx = self.ctx(owner);
        let resolved = resolve::resolve_path(&cx, root, path)?;
        if !resolved.is_complete() {
            return None;
        }
        let rendered_path = node::dot_delimited(&resolved.chain);
        resolved.deepest()?.documentation_for_key(&cx, &rendered_path)
    }

    /// Hover documentation for `value` assigned to the key at `path`.
    pub fn documentation_for_value(
        &self,
        owner: &str,
        root: &TypeRef,
        path: &[String],
        value: &str,
    ) -> Option<String> {
        let cx = self.ctx(owner);
        let resolved = resolve::resolve_path(&cx, root, path)?;
        if !resolved.is_complete() {
            return None;
        }
        let rendered_path = node::dot_delimited(&resolved.chain);
        resolved
            .deepest()?
            .documentation_for_value(&cx, &rendered_path, value)
    }

    /// Drop cached engines that depend on any of the changed types.
    pub fn invalidate_types(&self, changed: &[TypeRef]) {
        self.cache.invalidate_types(changed);
    }

    /// Drop every engine cached under `owner`.
    pub fn invalidate_owner(&self, owner: &str) {
        self.cache.invalidate_owner(owner);
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_engines(&self) -> usize {
        self.cache.len()
    }
}

/// Metadata for the position the resolved chain ends at: the deepest node's
/// target when there is one, the root otherwise.
fn position_metadata(
    cx: &QueryCtx,
    root: &TypeRef,
    resolved: &ResolvedPath,
) -> Option<Arc<TypeMetadata>> {
    match resolved.deepest() {
        Some(node) => node.target_metadata(cx),
        None => cx.metadata(root),
    }
}

fn root_kind(cx: &QueryCtx, root: &TypeRef) -> NodeKind {
    match cx.metadata(root) {
        Some(meta) => meta.kind(cx),
        None => NodeKind::Unknown,
    }
}

fn sanitize_set(raw: &HashSet<String>) -> HashSet<String> {
    raw.iter().map(|name| sanitize(name)).collect()
}
