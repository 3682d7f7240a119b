use rhoto_router::{
    MemoryHistory, Route, Router, RouterError, RouterOptions, RouterOptionsError,
};
use std::sync::Arc;

fn router_with(url: &str, options: RouterOptions) -> Router {
    Router::new(Arc::new(MemoryHistory::new(url)), Some(options))
}

#[test]
fn builder_rejects_zero_cache_capacity() {
    let err = RouterOptions::builder()
        .pattern_cache_capacity(0)
        .build()
        .expect_err("zero capacity should fail");
    assert_eq!(err, RouterOptionsError::CacheCapacityInvalid { provided: 0 });
}

#[test]
fn builder_rejects_blank_root_route() {
    let err = RouterOptions::builder()
        .root_route("   ")
        .build()
        .expect_err("blank root should fail");
    assert_eq!(err, RouterOptionsError::EmptyRootRoute);

    let wrapped: RouterError = err.into();
    assert!(matches!(wrapped, RouterError::Options(RouterOptionsError::EmptyRootRoute)));
}

#[test]
fn defaults_are_case_insensitive_and_lenient() {
    let options = RouterOptions::default();
    assert!(!options.case_sensitive);
    assert!(!options.strict);
    assert_eq!(options.root_route, "ROOT");
    options.validate().expect("defaults should validate");
}

#[test]
fn case_sensitive_option_applies_to_routes() {
    let route = Route::new("/about");

    let lenient = router_with("/About", RouterOptions::default());
    let found = route.resolve(&lenient.root_context()).expect("should compile");
    assert!(found.is_some());

    let options = RouterOptions::builder()
        .case_sensitive(true)
        .build()
        .expect("builder should succeed");
    let sensitive = router_with("/About", options);
    let found = route.resolve(&sensitive.root_context()).expect("should compile");
    assert!(found.is_none());
}

#[test]
fn strict_option_keeps_trailing_slash_significant() {
    let route = Route::new("/a").exact(true);

    let lenient = router_with("/a/", RouterOptions::default());
    assert!(route.resolve(&lenient.root_context()).expect("should compile").is_some());

    let options = RouterOptions::builder()
        .strict(true)
        .build()
        .expect("builder should succeed");
    let strict = router_with("/a/", options);
    assert!(route.resolve(&strict.root_context()).expect("should compile").is_none());
}

#[test]
fn root_route_names_the_tree_root() {
    let options = RouterOptions::builder()
        .root_route("APP")
        .build()
        .expect("builder should succeed");
    let router = router_with("/", options);
    assert_eq!(router.subroutes().route, "APP");
}

#[test]
fn cache_capacity_bounds_compiled_templates() {
    let options = RouterOptions::builder()
        .pattern_cache_capacity(1)
        .build()
        .expect("builder should succeed");
    let router = router_with("/a", options);
    let root = router.root_context();

    Route::new("/a").resolve(&root).expect("should compile");
    Route::new("/b").resolve(&root).expect("should compile");
    assert_eq!(router.patterns().len(), 1);
}
