//! Scriptable [`TypeIntrospector`] used by the integration tests.
#![allow(dead_code)] // not every test binary uses every builder
//!
//! Everything is keyed by canonical type name and sits behind mutexes so a
//! test can keep mutating the "host" (bump stamps, make a type uncomputable)
//! after the service has taken its `Arc`.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use propscope_api::{
    EnumConstantInfo, FieldInfo, MemberRef, TypeIntrospector, TypeRef, TypeShape,
};

#[derive(Default)]
pub struct MockIntrospector {
    shapes: Mutex<HashMap<String, TypeShape>>,
    fields: Mutex<HashMap<String, Vec<FieldInfo>>>,
    docs: Mutex<HashMap<MemberRef, String>>,
    deps: Mutex<HashMap<String, Vec<TypeRef>>>,
    stamps: Mutex<HashMap<String, u64>>,
    uncomputable: Mutex<HashSet<String>>,
}

impl MockIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(self, name: &str, fields: Vec<FieldInfo>) -> Self {
        self.shapes
            .lock()
            .unwrap()
            .insert(name.to_string(), TypeShape::Class);
        self.fields
            .lock()
            .unwrap()
            .insert(name.to_string(), fields);
        self
    }

    pub fn with_enum(self, name: &str, constants: &[&str]) -> Self {
        let ty = TypeRef::id(name);
        let constants = constants
            .iter()
            .map(|c| EnumConstantInfo::new(*c, ty.clone()))
            .collect();
        self.shapes
            .lock()
            .unwrap()
            .insert(name.to_string(), TypeShape::Enum { constants });
        self
    }

    /// Register one constant whose declared type differs from the enum.
    pub fn with_foreign_constant(self, enum_name: &str, constant: &str, declared: &str) -> Self {
        let mut shapes = self.shapes.lock().unwrap();
        if let Some(TypeShape::Enum { constants }) = shapes.get_mut(enum_name) {
            constants.push(EnumConstantInfo::new(constant, TypeRef::id(declared)));
        }
        drop(shapes);
        self
    }

    pub fn with_map(self, name: &str, key: TypeRef, value: TypeRef) -> Self {
        self.shapes
            .lock()
            .unwrap()
            .insert(name.to_string(), TypeShape::Map { key, value });
        self
    }

    pub fn with_list(self, name: &str, element: TypeRef) -> Self {
        self.shapes
            .lock()
            .unwrap()
            .insert(name.to_string(), TypeShape::Iterable { element });
        self
    }

    pub fn with_field_doc(self, declaring: &str, field: &str, doc: &str) -> Self {
        let member = MemberRef::Field {
            declaring: TypeRef::id(declaring),
            name: field.to_string(),
        };
        self.docs.lock().unwrap().insert(member, doc.to_string());
        self
    }

    pub fn with_constant_doc(self, declaring: &str, constant: &str, doc: &str) -> Self {
        let member = MemberRef::EnumConstant {
            declaring: TypeRef::id(declaring),
            name: constant.to_string(),
        };
        self.docs.lock().unwrap().insert(member, doc.to_string());
        self
    }

    pub fn with_deps(self, name: &str, deps: &[&str]) -> Self {
        let deps = deps.iter().map(|d| TypeRef::id(*d)).collect();
        self.deps.lock().unwrap().insert(name.to_string(), deps);
        self
    }

    pub fn bump_structure(&self, name: &str) {
        *self
            .stamps
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert(0) += 1;
    }

    pub fn set_uncomputable(&self, name: &str, uncomputable: bool) {
        let mut set = self.uncomputable.lock().unwrap();
        if uncomputable {
            set.insert(name.to_string());
        } else {
            set.remove(name);
        }
    }

    /// Replace the declared fields of an already registered class.
    pub fn replace_fields(&self, name: &str, fields: Vec<FieldInfo>) {
        self.fields
            .lock()
            .unwrap()
            .insert(name.to_string(), fields);
    }
}

impl TypeIntrospector for MockIntrospector {
    fn resolve(&self, ty: &TypeRef) -> Option<TypeShape> {
        self.shapes.lock().unwrap().get(&ty.canonical_name()).cloned()
    }

    fn fields(&self, class: &TypeRef) -> Vec<FieldInfo> {
        self.fields
            .lock()
            .unwrap()
            .get(&class.canonical_name())
            .cloned()
            .unwrap_or_default()
    }

    fn render_documentation(&self, member: &MemberRef) -> Option<String> {
        self.docs.lock().unwrap().get(member).cloned()
    }

    fn dependencies_of(&self, ty: &TypeRef) -> Option<Vec<TypeRef>> {
        let name = ty.canonical_name();
        if self.uncomputable.lock().unwrap().contains(&name) {
            return None;
        }
        Some(
            self.deps
                .lock()
                .unwrap()
                .get(&name)
                .cloned()
                .unwrap_or_else(|| vec![ty.clone()]),
        )
    }

    fn structure_stamp(&self, ty: &TypeRef) -> u64 {
        self.stamps
            .lock()
            .unwrap()
            .get(&ty.canonical_name())
            .copied()
            .unwrap_or(0)
    }
}
