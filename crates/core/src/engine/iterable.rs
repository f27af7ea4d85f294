//! Engine for iterable and array types.
//!
//! Iterables are transparent: every operation forwards to the element type.
//! The only trace they leave is a wrapper around the chain node resolved at
//! the iterable's own position, so ancestry still records that the value
//! sits inside a collection.

use propscope_api::TypeRef;

use crate::engine::QueryCtx;
use crate::node::SuggestionNode;

#[derive(Debug)]
pub struct IterableMetadata {
    ty: TypeRef,
    element: TypeRef,
}

impl IterableMetadata {
    pub fn new(ty: TypeRef, element: TypeRef) -> Self {
        Self { ty, element }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    pub fn element_type(&self) -> &TypeRef {
        &self.element
    }

    pub fn find_deepest(
        &self,
        cx: &QueryCtx,
        chain: &mut Vec<SuggestionNode>,
        segments: &[String],
        start: usize,
    ) -> usize {
        let Some(meta) = cx.metadata(&self.element) else {
            return start;
        };
        if meta.is_terminal() {
            return start;
        }
        let mark = chain.len();
        let consumed = meta.find_deepest(cx, chain, segments, start);
        // The node resolved at this position belongs to the element, but its
        // ancestry must still show the collection hop.
        if let Some(node) = chain.get(mark) {
            chain[mark] = SuggestionNode::IterableWrapper(Box::new(node.clone()));
        }
        consumed
    }
}
