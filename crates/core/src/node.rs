//! Resolved nodes of a key path.
//!
//! A query resolves a dotted path into a chain of these nodes, one per
//! consumed segment. Nodes are cheap value objects; all heavy state lives in
//! the cached engines they point back into.

use std::sync::Arc;

use propscope_api::{MemberRef, NodeKind, TypeRef};

use crate::classify;
use crate::engine::{QueryCtx, TypeMetadata};

#[derive(Debug, Clone)]
pub struct FieldNode {
    pub original_name: String,
    pub declaring: TypeRef,
    pub ty: TypeRef,
}

#[derive(Debug, Clone)]
pub struct ConstantNode {
    pub original_name: String,
    pub declaring: TypeRef,
}

#[derive(Debug, Clone)]
pub struct MapEntryNode {
    /// Literal key text as it appeared in the path (canonicalized when the
    /// key type is an enum).
    pub key_text: String,
    pub map: TypeRef,
    pub value: TypeRef,
}

#[derive(Debug, Clone)]
pub enum SuggestionNode {
    ClassField(FieldNode),
    EnumConstant(ConstantNode),
    MapEntry(MapEntryNode),
    /// The same node, reached through a collection position. Transparent for
    /// every operation; only ancestry rendering knows it is there.
    IterableWrapper(Box<SuggestionNode>),
}

impl SuggestionNode {
    /// Unsanitized name this node contributes to the dotted path.
    pub fn original_name(&self) -> &str {
        match self {
            SuggestionNode::ClassField(n) => &n.original_name,
            SuggestionNode::EnumConstant(n) => &n.original_name,
            SuggestionNode::MapEntry(n) => &n.key_text,
            SuggestionNode::IterableWrapper(inner) => inner.original_name(),
        }
    }

    /// Type sitting *under* this node, if the node leads anywhere.
    pub fn target_type(&self) -> Option<&TypeRef> {
        match self {
            SuggestionNode::ClassField(n) => Some(&n.ty),
            SuggestionNode::EnumConstant(_) => None,
            SuggestionNode::MapEntry(n) => Some(&n.value),
            SuggestionNode::IterableWrapper(inner) => inner.target_type(),
        }
    }

    pub fn target_metadata(&self, cx: &QueryCtx) -> Option<Arc<TypeMetadata>> {
        cx.metadata(self.target_type()?)
    }

    /// Kind of value this position holds. Wrappers forward to the wrapped
    /// node, so a list of enums reports `EnumConstant` here.
    pub fn node_kind(&self, cx: &QueryCtx) -> NodeKind {
        match self {
            SuggestionNode::ClassField(n) => classify::classify(cx.host, &n.ty),
            SuggestionNode::EnumConstant(_) => NodeKind::EnumConstant,
            SuggestionNode::MapEntry(n) => classify::classify(cx.host, &n.value),
            SuggestionNode::IterableWrapper(inner) => inner.node_kind(cx),
        }
    }

    /// Whether the path can continue below this node.
    pub fn is_leaf(&self, cx: &QueryCtx) -> bool {
        match self.target_metadata(cx) {
            Some(meta) => meta.is_leaf(cx),
            None => true,
        }
    }

    /// Whether this node has a documentable member behind it. Entry keys of
    /// free-form maps do not.
    pub fn supports_documentation(&self) -> bool {
        match self {
            SuggestionNode::ClassField(_) | SuggestionNode::EnumConstant(_) => true,
            SuggestionNode::MapEntry(_) => false,
            SuggestionNode::IterableWrapper(inner) => inner.supports_documentation(),
        }
    }

    /// Hover documentation for this node as the endpoint of `path`.
    pub fn documentation_for_key(&self, cx: &QueryCtx, path_dot_delimited: &str) -> Option<String> {
        let member = match self {
            SuggestionNode::ClassField(n) => MemberRef::Field {
                declaring: n.declaring.clone(),
                name: n.original_name.clone(),
            },
            SuggestionNode::EnumConstant(n) => MemberRef::EnumConstant {
                declaring: n.declaring.clone(),
                name: n.original_name.clone(),
            },
            SuggestionNode::MapEntry(_) => return None,
            SuggestionNode::IterableWrapper(inner) => {
                return inner.documentation_for_key(cx, path_dot_delimited);
            }
        };
        let doc = cx.host.render_documentation(&member).unwrap_or_default();
        Some(format!("<b>{path_dot_delimited}</b>{doc}"))
    }

    /// Hover documentation for `value` assigned at this position.
    pub fn documentation_for_value(
        &self,
        cx: &QueryCtx,
        path_dot_delimited: &str,
        value: &str,
    ) -> Option<String> {
        self.target_metadata(cx)?
            .documentation_for_value(cx, path_dot_delimited, value)
    }
}

/// Original names of every node in a chain, root first.
pub fn original_names(chain: &[SuggestionNode]) -> Vec<String> {
    chain
        .iter()
        .map(|node| node.original_name().to_string())
        .collect()
}

/// Dot-joined rendering of a chain, as shown in documentation headers.
pub fn dot_delimited(chain: &[SuggestionNode]) -> String {
    original_names(chain).join(".")
}
