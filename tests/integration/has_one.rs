use crate::common::{attrs, builder, builder_with_config, law_firm, lawyer};
use lifeline::{
    is_not_found, LifelineConfig, LifelineError, MockConnection, RelationOptions, ResolveModes,
    ResourceId,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_url_property_is_fetched_verbatim() {
    let conn = Arc::new(
        MockConnection::new().with_route("/headshots/5", json!({"id": 5, "style": "formal"})),
    );
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": "/headshots/5"}));

    let headshot = lawyer.has_one("headshot").unwrap().unwrap();
    assert_eq!(headshot.model().name(), "Headshot");
    assert_eq!(headshot.attribute("style"), Some(&json!("formal")));
    assert_eq!(conn.requests(), vec!["/headshots/5".to_string()]);
}

#[test]
fn test_nested_lookup_without_url_property() {
    let conn = Arc::new(
        MockConnection::new().with_route("/lawyers/42/headshot.json", json!({"id": 8})),
    );
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42}));

    let headshot = lawyer.has_one("headshot").unwrap().unwrap();
    assert_eq!(headshot.id(), Some(ResourceId::Int(8)));
    assert_eq!(headshot.prefix_options(), &attrs(json!({"lawyer_id": 42})));
    assert_eq!(conn.requests(), vec!["/lawyers/42/headshot.json".to_string()]);
}

#[test]
fn test_url_property_not_found_falls_through_to_nested() {
    let conn = Arc::new(
        MockConnection::new().with_route("/lawyers/42/headshot.json", json!({"id": 8})),
    );
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": "/headshots/5"}));

    assert!(lawyer.has_one("headshot").unwrap().is_some());
    assert_eq!(
        conn.requests(),
        vec!["/headshots/5".to_string(), "/lawyers/42/headshot.json".to_string()]
    );
}

#[test]
fn test_blank_url_property_is_ignored() {
    let conn = Arc::new(MockConnection::new());
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": ""}));

    assert!(lawyer.has_one("headshot").unwrap().is_none());
    assert_eq!(conn.requests(), vec!["/lawyers/42/headshot.json".to_string()]);
}

#[test]
fn test_nothing_found_is_cached() {
    let conn = Arc::new(MockConnection::new());
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": "/headshots/5"}));

    assert!(lawyer.has_one("headshot").unwrap().is_none());
    assert!(lawyer.is_relation_loaded("headshot"));
    assert!(lawyer.has_one("headshot").unwrap().is_none());

    assert_eq!(conn.requests().len(), 2);
}

#[test]
fn test_found_value_is_cached() {
    let conn = Arc::new(MockConnection::new().with_route("/headshots/5", json!({"id": 5})));
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": "/headshots/5"}));

    let first = lawyer.has_one("headshot").unwrap().unwrap() as *const _;
    let second = lawyer.has_one("headshot").unwrap().unwrap() as *const _;
    assert_eq!(first, second);
    assert_eq!(conn.request_count("/headshots/5"), 1);
}

#[test]
fn test_instances_cache_independently() {
    let conn = Arc::new(MockConnection::new());
    let registry = law_firm(&conn);
    let first = lawyer(&registry, json!({"id": 1}));
    let second = lawyer(&registry, json!({"id": 2}));

    first.has_one("headshot").unwrap();
    assert!(!second.is_relation_loaded("headshot"));
    second.has_one("headshot").unwrap();
    assert_eq!(
        conn.requests(),
        vec!["/lawyers/1/headshot.json".to_string(), "/lawyers/2/headshot.json".to_string()]
    );
}

#[test]
fn test_owner_without_id_still_issues_one_nested_lookup() {
    let conn = Arc::new(MockConnection::new());
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"name": "Ada"}));

    assert!(lawyer.has_one("headshot").unwrap().is_none());
    assert_eq!(conn.requests(), vec!["/headshot.json?lawyer_id".to_string()]);
}

#[test]
fn test_class_name_override() {
    let conn = Arc::new(
        MockConnection::new().with_route("/lawyers/42/headshot.json", json!({"id": 8})),
    );
    let registry = builder(&conn)
        .model("Lawyer", |m| {
            m.has_one("portrait", RelationOptions::new().class_name("Headshot"))
        })
        .model("Headshot", |m| m)
        .build()
        .unwrap();
    let lawyer = registry
        .model("Lawyer")
        .unwrap()
        .instantiate(attrs(json!({"id": 42, "portrait_url": "/headshots/missing"})));

    let portrait = lawyer.has_one("portrait").unwrap().unwrap();
    assert_eq!(portrait.model().name(), "Headshot");
    assert_eq!(
        conn.requests(),
        vec!["/headshots/missing".to_string(), "/lawyers/42/headshot.json".to_string()]
    );
}

#[test]
fn test_unknown_related_model_is_an_error_and_not_cached() {
    let conn = Arc::new(MockConnection::new());
    let registry = builder(&conn)
        .model("Lawyer", |m| m.has_one("avatar", RelationOptions::new()))
        .build()
        .unwrap();
    let lawyer = registry.model("Lawyer").unwrap().instantiate(attrs(json!({"id": 42})));

    match lawyer.has_one("avatar") {
        Err(LifelineError::NameResolution { name, owner }) => {
            assert_eq!(name, "Avatar");
            assert_eq!(owner, "Lawyer");
        }
        other => panic!("expected a name resolution error, got {:?}", other),
    }
    assert!(!lawyer.is_relation_loaded("avatar"));
    assert!(lawyer.has_one("avatar").is_err());
    assert!(conn.requests().is_empty());
}

#[test]
fn test_unknown_class_name_is_a_name_resolution_error() {
    let conn = Arc::new(MockConnection::new());
    let registry = builder(&conn)
        .model("Lawyer", |m| {
            m.has_one("portrait", RelationOptions::new().class_name("Photo"))
        })
        .model("Portrait", |m| m)
        .build()
        .unwrap();
    let lawyer = registry.model("Lawyer").unwrap().instantiate(attrs(json!({"id": 42})));

    assert!(matches!(
        lawyer.has_one("portrait"),
        Err(LifelineError::NameResolution { name, .. }) if name == "Photo"
    ));
}

#[test]
fn test_transport_error_propagates_without_fallback() {
    let conn = Arc::new(
        MockConnection::new()
            .with_status("/headshots/5", 503)
            .with_route("/lawyers/42/headshot.json", json!({"id": 8})),
    );
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": "/headshots/5"}));

    let error = lawyer.has_one("headshot").unwrap_err();
    assert!(matches!(error, LifelineError::Status { status: 503, .. }));
    assert!(!is_not_found(&error));
    assert!(!lawyer.is_relation_loaded("headshot"));
    assert_eq!(conn.requests(), vec!["/headshots/5".to_string()]);
}

#[test]
fn test_failed_resolution_is_retried() {
    let conn = Arc::new(MockConnection::new().with_route("/headshots/5", json!([1])));
    let registry = law_firm(&conn);
    let lawyer = lawyer(&registry, json!({"id": 42, "headshot_url": "/headshots/5"}));

    assert!(matches!(lawyer.has_one("headshot"), Err(LifelineError::Decode(_))));

    conn.add_route("/headshots/5", json!({"id": 5}));
    assert!(lawyer.has_one("headshot").unwrap().is_some());
    assert_eq!(conn.request_count("/headshots/5"), 2);
}

#[test]
fn test_prefix_options_are_kept_in_nested_path() {
    let conn = Arc::new(MockConnection::new().with_route(
        "/firms/7/lawyers/42/headshot.json",
        json!({"id": 8}),
    ));
    let registry = law_firm(&conn);
    let lawyer = registry
        .model("Lawyer")
        .unwrap()
        .instantiate_nested(attrs(json!({"id": 42})), attrs(json!({"firm_id": 7})));

    let headshot = lawyer.has_one("headshot").unwrap().unwrap();
    assert_eq!(
        headshot.prefix_options(),
        &attrs(json!({"firm_id": 7, "lawyer_id": 42}))
    );
}

#[test]
fn test_namespaced_owner_uses_simple_name_for_id_parameter() {
    let conn = Arc::new(
        MockConnection::new().with_route("/lawyers/42/headshot.json", json!({"id": 8})),
    );
    let registry = builder(&conn)
        .model("Api::Lawyer", |m| m.has_one("headshot", RelationOptions::new()))
        .model("Api::Headshot", |m| m)
        .model("Headshot", |m| m)
        .build()
        .unwrap();
    let lawyer = registry.model("Api::Lawyer").unwrap().instantiate(attrs(json!({"id": 42})));

    let headshot = lawyer.has_one("headshot").unwrap().unwrap();
    assert_eq!(headshot.model().name(), "Api::Headshot");
    assert_eq!(conn.requests(), vec!["/lawyers/42/headshot.json".to_string()]);
}

#[test]
fn test_declaration_modes_override_config() {
    let conn = Arc::new(
        MockConnection::new().with_route("/lawyers/42/headshot.json", json!({"id": 8})),
    );
    let registry = builder(&conn)
        .model("Lawyer", |m| {
            m.has_one(
                "headshot",
                RelationOptions::new().resolve_modes(ResolveModes::NESTED_URL),
            )
        })
        .model("Headshot", |m| m)
        .build()
        .unwrap();
    let lawyer = registry
        .model("Lawyer")
        .unwrap()
        .instantiate(attrs(json!({"id": 42, "headshot_url": "/headshots/5"})));

    assert!(lawyer.has_one("headshot").unwrap().is_some());
    assert_eq!(conn.requests(), vec!["/lawyers/42/headshot.json".to_string()]);
}

#[test]
fn test_config_modes_apply_to_undeclared_overrides() {
    let conn = Arc::new(MockConnection::new());
    let config = LifelineConfig {
        resolve_modes: ResolveModes::URL_PROPERTY,
        ..LifelineConfig::default()
    };
    let registry = builder_with_config(&conn, config)
        .model("Lawyer", |m| m.has_one("headshot", RelationOptions::new()))
        .model("Headshot", |m| m)
        .build()
        .unwrap();
    let lawyer = registry
        .model("Lawyer")
        .unwrap()
        .instantiate(attrs(json!({"id": 42, "headshot_url": "/headshots/5"})));

    assert!(lawyer.has_one("headshot").unwrap().is_none());
    assert_eq!(conn.requests(), vec!["/headshots/5".to_string()]);
}

#[test]
fn test_no_modes_resolves_to_nothing_without_requests() {
    let conn = Arc::new(MockConnection::new());
    let registry = builder(&conn)
        .model("Lawyer", |m| {
            m.has_one("headshot", RelationOptions::new().resolve_modes(ResolveModes::NONE))
        })
        .build()
        .unwrap();
    let lawyer = registry
        .model("Lawyer")
        .unwrap()
        .instantiate(attrs(json!({"id": 42, "headshot_url": "/headshots/5"})));

    // The related model is never looked up, so its absence is not an error.
    assert!(lawyer.has_one("headshot").unwrap().is_none());
    assert!(conn.requests().is_empty());
}
