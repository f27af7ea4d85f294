//! Host type-reflection collaborator.
//!
//! The suggestion engine never inspects types on its own; everything it knows
//! about the host's class/field/type graph flows through this trait. Hosts
//! (an IDE reflection layer, a bytecode index, a test mock) implement it once
//! and hand the engine an `Arc<dyn TypeIntrospector>`.

use crate::models::{FieldInfo, MemberRef, TypeRef, TypeShape};

pub trait TypeIntrospector: Send + Sync {
    /// Resolve the structural facts of a type.
    ///
    /// Returns `None` when the type cannot be resolved to a concrete
    /// declaration (forward reference, erasure, unsupported external type).
    /// The engine degrades such types to leaves with no children.
    fn resolve(&self, ty: &TypeRef) -> Option<TypeShape>;

    /// Enumerate the fields directly declared on a class type.
    ///
    /// Accessibility filtering happens in the engine; hosts report every
    /// declared field.
    fn fields(&self, class: &TypeRef) -> Vec<FieldInfo>;

    /// Render documentation for a field or enum constant.
    ///
    /// The returned markup is passed through to suggestion results untouched.
    fn render_documentation(&self, member: &MemberRef) -> Option<String>;

    /// The set of declaring types whose structural change must invalidate
    /// metadata derived from `ty`.
    ///
    /// Returns `None` when the dependency closure cannot be computed (for
    /// example an unresolvable cycle); cached metadata is then withheld
    /// entirely for this type.
    fn dependencies_of(&self, ty: &TypeRef) -> Option<Vec<TypeRef>>;

    /// Monotonic counter bumped whenever the *structure* of `ty` changes.
    ///
    /// Value-level changes must not bump the stamp.
    fn structure_stamp(&self, ty: &TypeRef) -> u64;
}
