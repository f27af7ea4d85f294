//! Classification of host types into suggestion-node kinds.
//!
//! Pure functions over the host's view of a type; nothing here caches beyond
//! what the host already caches. Rules are checked in order: enum, map,
//! iterable/array, concrete class with reachable fields, unknown.

use propscope_api::{EnumConstantInfo, NodeKind, TypeIntrospector, TypeRef, TypeShape};

pub fn classify(host: &dyn TypeIntrospector, ty: &TypeRef) -> NodeKind {
    // Arrays carry their element structurally; no host round-trip needed.
    if matches!(ty, TypeRef::Array { .. }) {
        return NodeKind::IterableElement;
    }
    match host.resolve(ty) {
        Some(TypeShape::Enum { .. }) => NodeKind::EnumConstant,
        Some(TypeShape::Map { .. }) => NodeKind::MapEntry,
        Some(TypeShape::Iterable { .. }) => NodeKind::IterableElement,
        Some(TypeShape::Class) => {
            if host.fields(ty).iter().any(|f| f.accessible()) {
                NodeKind::ClassField
            } else {
                NodeKind::Unknown
            }
        }
        Some(TypeShape::Unknown) | None => NodeKind::Unknown,
    }
}

/// Constants of an enum type, filtered to those declared *as* the enum type
/// itself; compatible-but-foreign constants are dropped.
pub fn enum_constants(host: &dyn TypeIntrospector, ty: &TypeRef) -> Vec<EnumConstantInfo> {
    match host.resolve(ty) {
        Some(TypeShape::Enum { constants }) => constants
            .into_iter()
            .filter(|c| &c.declared_type == ty)
            .collect(),
        _ => Vec::new(),
    }
}

/// Key and value types of a map type.
pub fn map_entry_types(host: &dyn TypeIntrospector, ty: &TypeRef) -> Option<(TypeRef, TypeRef)> {
    match host.resolve(ty) {
        Some(TypeShape::Map { key, value }) => Some((key, value)),
        _ => None,
    }
}

/// Element type of an iterable or array type.
pub fn element_type(host: &dyn TypeIntrospector, ty: &TypeRef) -> Option<TypeRef> {
    if let TypeRef::Array {
        element,
        dimensions,
    } = ty
    {
        return Some(if *dimensions > 1 {
            TypeRef::Array {
                element: element.clone(),
                dimensions: dimensions - 1,
            }
        } else {
            element.as_ref().clone()
        });
    }
    match host.resolve(ty) {
        Some(TypeShape::Iterable { element }) => Some(element),
        _ => None,
    }
}
