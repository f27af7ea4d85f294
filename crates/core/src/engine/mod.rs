//! Per-type metadata engines.
//!
//! One engine exists per concrete type encountered during resolution, cached
//! by [`crate::cache::MetadataCache`]. Each variant owns a lazily-built
//! prefix-searchable index over its children; once built the index is
//! immutable and the engine can be shared across query threads freely.

mod class;
mod enums;
mod iterable;
mod map;

pub use class::{ClassMetadata, FieldChild};
pub use enums::{ConstantChild, EnumMetadata};
pub use iterable::IterableMetadata;
pub use map::MapMetadata;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use propscope_api::{MemberRef, NodeKind, Suggestion, TypeIntrospector, TypeRef};

use crate::cache::MetadataCache;
use crate::classify;
use crate::node::{ConstantNode, FieldNode, SuggestionNode};

/// Everything a query needs to reach the host and the engine cache.
///
/// Cheap to construct per query; holds no state of its own.
#[derive(Clone, Copy)]
pub struct QueryCtx<'a> {
    pub host: &'a dyn TypeIntrospector,
    pub cache: &'a MetadataCache,
    /// Scope under which metadata is cached (a module, project, ...).
    pub owner: &'a str,
}

impl<'a> QueryCtx<'a> {
    /// Cached metadata engine for a type, or `None` when the host cannot
    /// supply enough structure to build one.
    pub fn metadata(&self, ty: &TypeRef) -> Option<Arc<TypeMetadata>> {
        self.cache.get(self.host, self.owner, ty)
    }
}

/// Metadata engine for one concrete type, one variant per classifier outcome.
#[derive(Debug)]
pub enum TypeMetadata {
    Class(ClassMetadata),
    Enum(EnumMetadata),
    Map(MapMetadata),
    Iterable(IterableMetadata),
    Unknown(TypeRef),
}

impl TypeMetadata {
    pub fn new(host: &dyn TypeIntrospector, ty: &TypeRef) -> Self {
        match classify::classify(host, ty) {
            NodeKind::EnumConstant => TypeMetadata::Enum(EnumMetadata::new(ty.clone())),
            NodeKind::MapEntry => match classify::map_entry_types(host, ty) {
                Some((key, value)) => TypeMetadata::Map(MapMetadata::new(ty.clone(), key, value)),
                None => TypeMetadata::Unknown(ty.clone()),
            },
            NodeKind::IterableElement => match classify::element_type(host, ty) {
                Some(element) => {
                    TypeMetadata::Iterable(IterableMetadata::new(ty.clone(), element))
                }
                None => TypeMetadata::Unknown(ty.clone()),
            },
            NodeKind::ClassField => TypeMetadata::Class(ClassMetadata::new(ty.clone())),
            NodeKind::Unknown => TypeMetadata::Unknown(ty.clone()),
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        match self {
            TypeMetadata::Class(m) => m.type_ref(),
            TypeMetadata::Enum(m) => m.type_ref(),
            TypeMetadata::Map(m) => m.type_ref(),
            TypeMetadata::Iterable(m) => m.type_ref(),
            TypeMetadata::Unknown(ty) => ty,
        }
    }

    /// Kind reported for this position. Iterable engines forward the
    /// *element's* kind: collection-ness is encoded positionally, through the
    /// wrapper node in the ancestor chain, never as a kind tag.
    pub fn kind(&self, cx: &QueryCtx) -> NodeKind {
        match self {
            TypeMetadata::Class(_) => NodeKind::ClassField,
            TypeMetadata::Enum(_) => NodeKind::EnumConstant,
            TypeMetadata::Map(_) => NodeKind::MapEntry,
            TypeMetadata::Iterable(m) => classify::classify(cx.host, m.element_type()),
            TypeMetadata::Unknown(_) => NodeKind::Unknown,
        }
    }

    /// Terminal engines never resolve nested key paths.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TypeMetadata::Enum(_) | TypeMetadata::Unknown(_))
    }

    pub fn is_leaf(&self, cx: &QueryCtx) -> bool {
        match self {
            TypeMetadata::Class(m) => !m.has_children(cx),
            TypeMetadata::Enum(_) => true,
            TypeMetadata::Map(_) => false,
            TypeMetadata::Iterable(m) => match cx.metadata(m.element_type()) {
                Some(element) => element.is_leaf(cx),
                None => true,
            },
            TypeMetadata::Unknown(_) => true,
        }
    }

    /// Exact sanitized-name child lookup.
    pub fn find_direct_child(&self, cx: &QueryCtx, name: &str) -> Option<ChildHelper> {
        match self {
            TypeMetadata::Class(m) => m.find_direct_child(cx, name),
            TypeMetadata::Enum(m) => m.find_direct_child(cx, name),
            TypeMetadata::Map(m) => m.find_direct_child(cx, name),
            TypeMetadata::Iterable(m) => {
                let element = cx.metadata(m.element_type())?;
                Some(element.find_direct_child(cx, name)?.via_iterable())
            }
            TypeMetadata::Unknown(_) => None,
        }
    }

    /// Trie prefix search over direct children.
    ///
    /// `None` means "no index at all" (the type has zero resolvable
    /// children); an empty vec means the index exists but nothing matched.
    pub fn find_children_for_prefix(
        &self,
        cx: &QueryCtx,
        prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<Vec<ChildHelper>> {
        match self {
            TypeMetadata::Class(m) => m.find_children_for_prefix(cx, prefix, exclude),
            TypeMetadata::Enum(m) => m.find_children_for_prefix(cx, prefix, exclude),
            TypeMetadata::Map(m) => m.find_children_for_prefix(cx, prefix, exclude),
            TypeMetadata::Iterable(m) => {
                let element = cx.metadata(m.element_type())?;
                let helpers = element.find_children_for_prefix(cx, prefix, exclude)?;
                Some(helpers.into_iter().map(ChildHelper::via_iterable).collect())
            }
            TypeMetadata::Unknown(_) => None,
        }
    }

    /// Walk `segments[start..]` downwards, appending one resolved node per
    /// consumed segment to `chain`; returns the index of the first segment
    /// that did not resolve. Partial resolution is the expected, reportable
    /// outcome, never an error.
    ///
    /// # Panics
    ///
    /// Panics when invoked on an enum engine: enum constants are terminal and
    /// callers must have routed key-vs-value resolution before descending.
    pub fn find_deepest(
        &self,
        cx: &QueryCtx,
        chain: &mut Vec<SuggestionNode>,
        segments: &[String],
        start: usize,
    ) -> usize {
        if start >= segments.len() {
            return start;
        }
        match self {
            TypeMetadata::Class(m) => m.find_deepest(cx, chain, segments, start),
            TypeMetadata::Enum(_) => panic!(
                "structural descent is not valid on an enum engine; enum constants are terminal \
                 (resolve map keys via find_direct_child instead)"
            ),
            TypeMetadata::Map(m) => m.find_deepest(cx, chain, segments, start),
            TypeMetadata::Iterable(m) => m.find_deepest(cx, chain, segments, start),
            TypeMetadata::Unknown(_) => start,
        }
    }

    /// Key suggestions for the (possibly dotted) query prefix in
    /// `query_segments[start..]`; all segments before the last must resolve
    /// exactly, the last is prefix-matched.
    ///
    /// # Panics
    ///
    /// Panics on enum engines, same contract as [`Self::find_deepest`].
    pub fn key_suggestions(
        &self,
        cx: &QueryCtx,
        chain: &[SuggestionNode],
        num_of_ancestors: usize,
        query_segments: &[String],
        start: usize,
        exclude: Option<&HashSet<String>>,
    ) -> Option<BTreeSet<Suggestion>> {
        match self {
            TypeMetadata::Class(m) => {
                m.key_suggestions(cx, chain, num_of_ancestors, query_segments, start, exclude)
            }
            TypeMetadata::Enum(_) => panic!(
                "key suggestions are not valid on an enum engine; enum constants are terminal \
                 (map keys go through find_children_for_prefix instead)"
            ),
            TypeMetadata::Map(m) => {
                m.key_suggestions(cx, chain, num_of_ancestors, query_segments, start, exclude)
            }
            TypeMetadata::Iterable(m) => {
                let element = cx.metadata(m.element_type())?;
                if element.is_terminal() {
                    return None;
                }
                element.key_suggestions(cx, chain, num_of_ancestors, query_segments, start, exclude)
            }
            TypeMetadata::Unknown(_) => None,
        }
    }

    /// Value suggestions for a prefix; `None` for open-ended value spaces.
    pub fn value_suggestions(
        &self,
        cx: &QueryCtx,
        chain: &[SuggestionNode],
        prefix: &str,
        exclude: Option<&HashSet<String>>,
    ) -> Option<BTreeSet<Suggestion>> {
        match self {
            TypeMetadata::Class(_) => None,
            TypeMetadata::Enum(m) => m.value_suggestions(cx, chain, prefix, exclude),
            TypeMetadata::Map(_) => None,
            TypeMetadata::Iterable(m) => {
                let element = cx.metadata(m.element_type())?;
                element.value_suggestions(cx, chain, prefix, exclude)
            }
            TypeMetadata::Unknown(_) => None,
        }
    }

    /// Documentation for an already-typed value at this position.
    pub fn documentation_for_value(
        &self,
        cx: &QueryCtx,
        path_dot_delimited: &str,
        value: &str,
    ) -> Option<String> {
        match self {
            TypeMetadata::Enum(m) => m.documentation_for_value(cx, path_dot_delimited, value),
            TypeMetadata::Iterable(m) => {
                let element = cx.metadata(m.element_type())?;
                element.documentation_for_value(cx, path_dot_delimited, value)
            }
            _ => None,
        }
    }
}

/// A resolvable direct child of an engine, paired with everything needed to
/// turn it into a suggestion or a chain node.
#[derive(Debug, Clone)]
pub struct ChildHelper {
    kind: ChildKind,
    declaring: TypeRef,
    via_iterable: bool,
}

#[derive(Debug, Clone)]
enum ChildKind {
    Field(Arc<FieldChild>),
    Constant(Arc<ConstantChild>),
}

impl ChildHelper {
    pub(crate) fn field(child: Arc<FieldChild>, declaring: TypeRef) -> Self {
        Self {
            kind: ChildKind::Field(child),
            declaring,
            via_iterable: false,
        }
    }

    pub(crate) fn constant(child: Arc<ConstantChild>, declaring: TypeRef) -> Self {
        Self {
            kind: ChildKind::Constant(child),
            declaring,
            via_iterable: false,
        }
    }

    /// Mark the child as reached through an iterable position; its chain node
    /// will be wrapped accordingly.
    pub(crate) fn via_iterable(mut self) -> Self {
        self.via_iterable = true;
        self
    }

    /// Raw, unsanitized identifier.
    pub fn original_name(&self) -> &str {
        match &self.kind {
            ChildKind::Field(f) => &f.original_name,
            ChildKind::Constant(c) => &c.original_name,
        }
    }

    pub fn sanitized_name(&self) -> &str {
        match &self.kind {
            ChildKind::Field(f) => &f.sanitized,
            ChildKind::Constant(c) => &c.sanitized,
        }
    }

    /// Declared type of a field child; constants have none.
    pub(crate) fn field_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            ChildKind::Field(f) => Some(&f.ty),
            ChildKind::Constant(_) => None,
        }
    }

    pub fn node_kind(&self, cx: &QueryCtx) -> NodeKind {
        match &self.kind {
            ChildKind::Field(f) => classify::classify(cx.host, &f.ty),
            ChildKind::Constant(_) => NodeKind::EnumConstant,
        }
    }

    /// The chain node this child resolves to.
    pub fn to_node(&self) -> SuggestionNode {
        let inner = match &self.kind {
            ChildKind::Field(f) => SuggestionNode::ClassField(FieldNode {
                original_name: f.original_name.clone(),
                declaring: self.declaring.clone(),
                ty: f.ty.clone(),
            }),
            ChildKind::Constant(c) => SuggestionNode::EnumConstant(ConstantNode {
                original_name: c.original_name.clone(),
                declaring: self.declaring.clone(),
            }),
        };
        if self.via_iterable {
            SuggestionNode::IterableWrapper(Box::new(inner))
        } else {
            inner
        }
    }

    fn member_ref(&self) -> MemberRef {
        match &self.kind {
            ChildKind::Field(f) => MemberRef::Field {
                declaring: self.declaring.clone(),
                name: f.original_name.clone(),
            },
            ChildKind::Constant(c) => MemberRef::EnumConstant {
                declaring: self.declaring.clone(),
                name: c.original_name.clone(),
            },
        }
    }

    fn short_type(&self) -> String {
        match &self.kind {
            ChildKind::Field(f) => f.ty.short_name(),
            ChildKind::Constant(_) => self.declaring.short_name(),
        }
    }

    /// One key suggestion for this child under the given ancestor chain.
    pub fn build_suggestion_for_key(
        &self,
        cx: &QueryCtx,
        matches_root_till_parent: &[SuggestionNode],
        num_of_ancestors: usize,
    ) -> Suggestion {
        let mut names = crate::node::original_names(matches_root_till_parent);
        names.push(self.original_name().to_string());
        let mut suggestion =
            Suggestion::new_key(names, num_of_ancestors).with_short_type(self.short_type());
        if let Some(doc) = cx.host.render_documentation(&self.member_ref()) {
            suggestion = suggestion.with_description(doc);
        }
        suggestion
    }

    /// Documentation shown when the child is the exact match for a key path.
    pub fn documentation_for_key(&self, cx: &QueryCtx, path_dot_delimited: &str) -> String {
        let doc = cx
            .host
            .render_documentation(&self.member_ref())
            .unwrap_or_default();
        format!("<b>{path_dot_delimited}</b>{doc}")
    }
}
