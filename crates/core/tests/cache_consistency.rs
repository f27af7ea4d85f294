mod common;

use std::sync::Arc;

use common::MockIntrospector;
use propscope_api::{FieldInfo, TypeRef};
use propscope_core::cache::MetadataCache;
use propscope_core::SuggestionService;

const OWNER: &str = "demo-module";

fn root() -> TypeRef {
    TypeRef::id("com.acme.ServerProperties")
}

fn host() -> MockIntrospector {
    MockIntrospector::new()
        .with_class(
            "com.acme.ServerProperties",
            vec![
                FieldInfo::new("hostName", TypeRef::raw("java.lang.String")),
                FieldInfo::new("pool", TypeRef::id("com.acme.PoolProperties")),
            ],
        )
        .with_class(
            "com.acme.PoolProperties",
            vec![FieldInfo::new("maxSize", TypeRef::raw("int"))],
        )
}

#[test]
fn repeated_lookups_share_one_engine() {
    let host = host();
    let cache = MetadataCache::new();
    let first = cache.get(&host, OWNER, &root()).unwrap();
    let second = cache.get(&host, OWNER, &root()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn owners_cache_independently() {
    let host = host();
    let cache = MetadataCache::new();
    let a = cache.get(&host, "module-a", &root()).unwrap();
    let b = cache.get(&host, "module-b", &root()).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));

    cache.invalidate_owner("module-a");
    let b_again = cache.get(&host, "module-b", &root()).unwrap();
    assert!(Arc::ptr_eq(&b, &b_again));
    let a_again = cache.get(&host, "module-a", &root()).unwrap();
    assert!(!Arc::ptr_eq(&a, &a_again));
}

#[test]
fn structure_stamp_drift_rebuilds_the_engine() {
    let host = host();
    let cache = MetadataCache::new();
    let before = cache.get(&host, OWNER, &root()).unwrap();

    host.bump_structure("com.acme.ServerProperties");
    let after = cache.get(&host, OWNER, &root()).unwrap();
    assert!(!Arc::ptr_eq(&before, &after));

    // Stable stamps keep the rebuilt engine.
    let again = cache.get(&host, OWNER, &root()).unwrap();
    assert!(Arc::ptr_eq(&after, &again));
}

#[test]
fn drift_in_any_declared_dependency_rebuilds() {
    let host = host().with_deps(
        "com.acme.ServerProperties",
        &["com.acme.ServerProperties", "com.acme.PoolProperties"],
    );
    let cache = MetadataCache::new();
    let before = cache.get(&host, OWNER, &root()).unwrap();

    host.bump_structure("com.acme.PoolProperties");
    let after = cache.get(&host, OWNER, &root()).unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn uncomputable_dependencies_withhold_metadata_until_resolved() {
    let host = host();
    let cache = MetadataCache::new();
    assert!(cache.get(&host, OWNER, &root()).is_some());

    // Stale entry plus an uncomputable closure: the entry must go away, not
    // linger half-valid.
    host.bump_structure("com.acme.ServerProperties");
    host.set_uncomputable("com.acme.ServerProperties", true);
    assert!(cache.get(&host, OWNER, &root()).is_none());
    assert!(cache.is_empty());

    host.set_uncomputable("com.acme.ServerProperties", false);
    assert!(cache.get(&host, OWNER, &root()).is_some());
}

#[test]
fn rebuilt_engines_see_the_new_structure() {
    let host = Arc::new(host());
    let svc = SuggestionService::new(host.clone());
    let got = svc
        .find_suggestions_for_prefix(OWNER, &root(), &[], "", None)
        .unwrap();
    assert_eq!(got[0].display_text, "hostName");

    host.replace_fields(
        "com.acme.ServerProperties",
        vec![FieldInfo::new("endpoint", TypeRef::raw("java.lang.String"))],
    );
    host.bump_structure("com.acme.ServerProperties");

    let got = svc
        .find_suggestions_for_prefix(OWNER, &root(), &[], "", None)
        .unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].display_text, "endpoint");
}

#[test]
fn explicit_type_invalidation_drops_dependents() {
    let host = Arc::new(host());
    let svc = SuggestionService::new(host.clone());
    svc.find_suggestions_for_prefix(OWNER, &root(), &[], "", None)
        .unwrap();
    assert!(svc.cached_engines() > 0);

    // No stamp bump: only the explicit invalidation forces the refresh.
    host.replace_fields(
        "com.acme.ServerProperties",
        vec![FieldInfo::new("endpoint", TypeRef::raw("java.lang.String"))],
    );
    let stale = svc
        .find_suggestions_for_prefix(OWNER, &root(), &[], "", None)
        .unwrap();
    assert_eq!(stale[0].display_text, "hostName");

    svc.invalidate_types(&[root()]);
    let fresh = svc
        .find_suggestions_for_prefix(OWNER, &root(), &[], "", None)
        .unwrap();
    assert_eq!(fresh[0].display_text, "endpoint");
}

#[test]
fn concurrent_lookups_converge_on_one_engine() {
    let host = host();
    let cache = MetadataCache::new();
    let engines = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.get(&host, OWNER, &root()).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    for engine in &engines[1..] {
        assert!(Arc::ptr_eq(&engines[0], engine));
    }
    assert_eq!(cache.len(), 1);
}
