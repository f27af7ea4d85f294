mod common;

use std::sync::Arc;

use common::MockIntrospector;
use propscope_api::{FieldInfo, TypeRef};
use propscope_core::cache::MetadataCache;
use propscope_core::engine::QueryCtx;
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
                FieldInfo::new("scheme", TypeRef::id("com.acme.Scheme")),
                FieldInfo::new("themes", TypeRef::id("com.acme.Themes")),
                FieldInfo::new("labels", TypeRef::id("com.acme.Labels")),
                FieldInfo::new("workers", TypeRef::id("com.acme.Workers")),
                FieldInfo::new("schemes", TypeRef::id("com.acme.SchemeList")),
            ],
        )
        .with_class(
            "com.acme.PoolProperties",
            vec![FieldInfo::new("maxSize", TypeRef::raw("int"))],
        )
        .with_enum("com.acme.Scheme", &["HTTP", "HTTPS"])
        .with_enum("com.acme.Color", &["RED", "LIGHT_BLUE"])
        .with_map(
            "com.acme.Themes",
            TypeRef::id("com.acme.Color"),
            TypeRef::raw("java.lang.String"),
        )
        .with_map(
            "com.acme.Labels",
            TypeRef::raw("java.lang.String"),
            TypeRef::raw("java.lang.String"),
        )
        .with_list("com.acme.Workers", TypeRef::id("com.acme.PoolProperties"))
        .with_list("com.acme.SchemeList", TypeRef::id("com.acme.Scheme"))
        .with_field_doc("com.acme.ServerProperties", "hostName", " host to bind")
        .with_field_doc("com.acme.PoolProperties", "maxSize", " upper pool bound")
        .with_constant_doc("com.acme.Scheme", "HTTPS", " TLS endpoint")
}

fn service() -> SuggestionService {
    SuggestionService::new(Arc::new(host()))
}

fn segs(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn full_paths_resolve_one_node_per_segment() {
    let svc = service();
    let resolved = svc
        .resolve_path(OWNER, &root(), &segs(&["pool", "max-size"]))
        .unwrap();
    assert!(resolved.is_complete());
    assert_eq!(resolved.chain.len(), 2);
    assert_eq!(resolved.chain[0].original_name(), "pool");
    // Original spelling survives even when the query segment was sanitized.
    assert_eq!(resolved.chain[1].original_name(), "maxSize");
}

#[test]
fn partial_resolution_reports_the_leftover_segments() {
    let svc = service();
    let resolved = svc
        .resolve_path(OWNER, &root(), &segs(&["pool", "bogus", "deeper"]))
        .unwrap();
    assert!(!resolved.is_complete());
    assert_eq!(resolved.chain.len(), 1);
    assert_eq!(resolved.unresolved, segs(&["bogus", "deeper"]));
}

#[test]
fn enum_keyed_map_canonicalizes_the_key_segment() {
    let svc = service();
    let resolved = svc
        .resolve_path(OWNER, &root(), &segs(&["themes", "light-blue"]))
        .unwrap();
    assert!(resolved.is_complete());
    assert_eq!(resolved.chain[1].original_name(), "LIGHT_BLUE");
}

#[test]
fn enum_keyed_map_rejects_unknown_keys() {
    let svc = service();
    let resolved = svc
        .resolve_path(OWNER, &root(), &segs(&["themes", "MAGENTA"]))
        .unwrap();
    assert_eq!(resolved.chain.len(), 1);
    assert_eq!(resolved.unresolved, segs(&["MAGENTA"]));
}

#[test]
fn free_form_map_accepts_any_key_and_stops_at_its_value() {
    let svc = service();
    let resolved = svc
        .resolve_path(OWNER, &root(), &segs(&["labels", "anything", "deeper"]))
        .unwrap();
    assert_eq!(resolved.chain.len(), 2);
    assert_eq!(resolved.chain[1].original_name(), "anything");
    assert_eq!(resolved.unresolved, segs(&["deeper"]));
}

#[test]
fn iterable_hops_resolve_through_to_the_element() {
    let svc = service();
    let resolved = svc
        .resolve_path(OWNER, &root(), &segs(&["workers", "maxSize"]))
        .unwrap();
    assert!(resolved.is_complete());
    assert_eq!(resolved.chain.len(), 2);
    // The wrapper stays invisible in path rendering.
    assert_eq!(resolved.chain[1].original_name(), "maxSize");
}

#[test]
fn documentation_for_a_key_renders_the_full_path() {
    let svc = service();
    let doc = svc
        .documentation_for_path(OWNER, &root(), &segs(&["hostName"]))
        .unwrap();
    assert_eq!(doc, "<b>hostName</b> host to bind");

    // Member documentation is reachable through an iterable hop.
    let doc = svc
        .documentation_for_path(OWNER, &root(), &segs(&["workers", "maxSize"]))
        .unwrap();
    assert_eq!(doc, "<b>workers.maxSize</b> upper pool bound");
}

#[test]
fn documentation_for_an_enum_value_names_the_constant() {
    let svc = service();
    let doc = svc
        .documentation_for_value(OWNER, &root(), &segs(&["scheme"]), "https")
        .unwrap();
    assert_eq!(doc, "<b>scheme</b> = <b>HTTPS</b> TLS endpoint");

    assert!(
        svc.documentation_for_value(OWNER, &root(), &segs(&["scheme"]), "gopher")
            .is_none()
    );
}

#[test]
fn value_queries_pass_through_iterable_positions() {
    let svc = service();
    let got = svc
        .find_value_suggestions(OWNER, &root(), &segs(&["schemes"]), "", None)
        .unwrap();
    let texts: Vec<&str> = got.iter().map(|s| s.display_text.as_str()).collect();
    assert_eq!(texts, vec!["HTTP", "HTTPS"]);
}

#[test]
fn incomplete_paths_have_no_documentation() {
    let svc = service();
    assert!(
        svc.documentation_for_path(OWNER, &root(), &segs(&["pool", "bogus"]))
            .is_none()
    );
}

#[test]
#[should_panic(expected = "not valid on an enum engine")]
fn structural_descent_on_an_enum_engine_panics() {
    let host = host();
    let cache = MetadataCache::new();
    let cx = QueryCtx {
        host: &host,
        cache: &cache,
        owner: OWNER,
    };
    let meta = cx.metadata(&TypeRef::id("com.acme.Scheme")).unwrap();
    let mut chain = Vec::new();
    meta.find_deepest(&cx, &mut chain, &segs(&["HTTP"]), 0);
}
