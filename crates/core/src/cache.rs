//! Invalidation-aware cache of per-type metadata engines.
//!
//! Entries are keyed by `(owner, canonical type name)` and carry a snapshot
//! of the structure stamps of every type the engine depends on. A lookup
//! revalidates the snapshot against the host; any drifted stamp discards the
//! entry and rebuilds it in place, under the map's per-key lock, so at most
//! one thread builds an engine for a given key at a time.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use propscope_api::{TypeIntrospector, TypeRef};
use tracing::debug;

use crate::engine::TypeMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    owner: String,
    type_name: String,
}

#[derive(Debug)]
struct CacheEntry {
    metadata: Arc<TypeMetadata>,
    /// Dependency types with the structure stamps they had at build time.
    deps: Vec<(TypeRef, u64)>,
}

#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: DashMap<CacheKey, Arc<CacheEntry>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata engine for `ty`, rebuilt if any dependency stamp drifted.
    ///
    /// `None` means the host cannot (currently) compute the type's
    /// dependency closure; the caller degrades to "no suggestions" and a
    /// later lookup may succeed again.
    pub fn get(
        &self,
        host: &dyn TypeIntrospector,
        owner: &str,
        ty: &TypeRef,
    ) -> Option<Arc<TypeMetadata>> {
        let key = CacheKey {
            owner: owner.to_string(),
            type_name: ty.canonical_name(),
        };
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if is_fresh(host, occupied.get()) {
                    return Some(Arc::clone(&occupied.get().metadata));
                }
                debug!(ty = %ty.canonical_name(), owner, "dependency stamp drifted, rebuilding");
                match build_entry(host, ty) {
                    Some(entry) => {
                        let metadata = Arc::clone(&entry.metadata);
                        occupied.insert(Arc::new(entry));
                        Some(metadata)
                    }
                    None => {
                        occupied.remove();
                        None
                    }
                }
            }
            Entry::Vacant(vacant) => {
                let entry = build_entry(host, ty)?;
                let metadata = Arc::clone(&entry.metadata);
                vacant.insert(Arc::new(entry));
                Some(metadata)
            }
        }
    }

    /// Drop every entry that depends on one of the changed types.
    pub fn invalidate_types(&self, changed: &[TypeRef]) {
        let changed_names: Vec<String> = changed.iter().map(TypeRef::canonical_name).collect();
        self.entries.retain(|_, entry| {
            !entry
                .deps
                .iter()
                .any(|(dep, _)| changed_names.iter().any(|name| *name == dep.canonical_name()))
        });
    }

    /// Drop every entry cached under `owner`.
    pub fn invalidate_owner(&self, owner: &str) {
        self.entries.retain(|key, _| key.owner != owner);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_fresh(host: &dyn TypeIntrospector, entry: &CacheEntry) -> bool {
    entry
        .deps
        .iter()
        .all(|(dep, stamp)| host.structure_stamp(dep) == *stamp)
}

fn build_entry(host: &dyn TypeIntrospector, ty: &TypeRef) -> Option<CacheEntry> {
    let deps = host.dependencies_of(ty)?;
    let deps = deps
        .into_iter()
        .map(|dep| {
            let stamp = host.structure_stamp(&dep);
            (dep, stamp)
        })
        .collect();
    Some(CacheEntry {
        metadata: Arc::new(TypeMetadata::new(host, ty)),
        deps,
    })
}
