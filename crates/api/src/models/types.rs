use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to a host type.
///
/// The suggestion engine treats this as an opaque handle: identity (Eq + Hash)
/// and a canonical name are the only structure it relies on. Everything else
/// about a type is obtained through the [`TypeIntrospector`] collaborator.
///
/// [`TypeIntrospector`]: crate::introspection::TypeIntrospector
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Unresolved or primitive type name (e.g., "int", "java.lang.String")
    Raw(String),

    /// Resolved reference to a declared type (FQN)
    Id(String),

    /// Generic instantiation (e.g., Map<String, Integer>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    Unknown,
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    /// Fully qualified display form, usable as a cache-key component.
    pub fn canonical_name(&self) -> String {
        match self {
            TypeRef::Raw(s) | TypeRef::Id(s) => s.clone(),
            TypeRef::Generic { base, args } => {
                let args = args
                    .iter()
                    .map(|a| a.canonical_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", base.canonical_name(), args)
            }
            TypeRef::Array {
                element,
                dimensions,
            } => format!("{}{}", element.canonical_name(), "[]".repeat(*dimensions)),
            TypeRef::Unknown => "?".to_string(),
        }
    }

    /// Non-qualified form used for display next to a suggestion.
    pub fn short_name(&self) -> String {
        match self {
            TypeRef::Raw(s) | TypeRef::Id(s) => {
                s.rsplit('.').next().unwrap_or(s.as_str()).to_string()
            }
            TypeRef::Generic { base, args } => {
                let args = args
                    .iter()
                    .map(|a| a.short_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", base.short_name(), args)
            }
            TypeRef::Array {
                element,
                dimensions,
            } => format!("{}{}", element.short_name(), "[]".repeat(*dimensions)),
            TypeRef::Unknown => "?".to_string(),
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unknown
    }
}

/// Structural facts about a type, as seen by the host at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// Enumeration with a closed set of constants
    Enum { constants: Vec<EnumConstantInfo> },
    /// Map capability, with key and value types
    Map { key: TypeRef, value: TypeRef },
    /// Iterable capability, with the element type
    Iterable { element: TypeRef },
    /// Concrete declared type; fields are enumerated separately
    Class,
    /// Structure could not be determined
    Unknown,
}

/// A declared field of a class type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Raw, unsanitized field name
    pub name: String,
    /// Field type
    pub ty: TypeRef,
    pub readable: bool,
    pub writable: bool,
    pub deprecated: bool,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: true,
            writable: true,
            deprecated: false,
        }
    }

    /// Only fields readable and writable through the host surface in
    /// suggestions.
    pub fn accessible(&self) -> bool {
        self.readable && self.writable
    }
}

/// A constant declared on an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstantInfo {
    /// Raw constant name
    pub name: String,
    /// The constant's declared type. Constants whose declared type differs
    /// from the enum itself (compatible-but-foreign) are not suggested.
    pub declared_type: TypeRef,
}

impl EnumConstantInfo {
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }
}

/// Addresses a documentable member for [`TypeIntrospector::render_documentation`].
///
/// [`TypeIntrospector::render_documentation`]: crate::introspection::TypeIntrospector::render_documentation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberRef {
    Field { declaring: TypeRef, name: String },
    EnumConstant { declaring: TypeRef, name: String },
}

/// Classification of a suggestion node position.
///
/// Assigned once at classification time and immutable thereafter. Note that
/// iterable positions report their *element's* kind through the wrapper node;
/// `IterableElement` only shows up as the raw classifier outcome.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    ClassField,
    EnumConstant,
    MapEntry,
    IterableElement,
    Unknown,
}

impl NodeKind {
    /// Terminal kinds never have nested key children.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::EnumConstant | NodeKind::Unknown)
    }
}
