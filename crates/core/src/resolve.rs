//! Dotted-path resolution against a root type.

use propscope_api::TypeRef;

use crate::engine::QueryCtx;
use crate::node::SuggestionNode;

/// Outcome of resolving a dotted path: the chain of nodes that did resolve,
/// plus whatever segments were left over. Stopping early is an ordinary
/// outcome (the user may still be typing the path), not an error.
#[derive(Debug)]
pub struct ResolvedPath {
    pub chain: Vec<SuggestionNode>,
    pub unresolved: Vec<String>,
}

impl ResolvedPath {
    /// Every segment resolved to a node.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn deepest(&self) -> Option<&SuggestionNode> {
        self.chain.last()
    }
}

/// Resolve `segments` downwards from `root`, one chain node per consumed
/// segment. `None` only when no metadata can be built for the root itself.
pub fn resolve_path(
    cx: &QueryCtx,
    root: &TypeRef,
    segments: &[String],
) -> Option<ResolvedPath> {
    let meta = cx.metadata(root)?;
    let mut chain = Vec::new();
    let consumed = if meta.is_terminal() {
        0
    } else {
        meta.find_deepest(cx, &mut chain, segments, 0)
    };
    debug_assert_eq!(chain.len(), consumed);
    Some(ResolvedPath {
        chain,
        unresolved: segments[consumed..].to_vec(),
    })
}
