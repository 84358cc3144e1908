use crate::common::{attrs, builder_with_config};
use lifeline::{LifelineConfig, MockConnection, RelationOptions, ResolveModes};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

#[test]
fn test_config_file_drives_has_one_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[lifeline]\nsite = \"https://api.example.com\"\n\n\
         [lifeline.resolve_modes]\nuse_url_property = false\n"
    )
    .unwrap();

    let config = LifelineConfig::load_from(file.path()).unwrap();
    assert_eq!(config.site, "https://api.example.com");
    assert_eq!(config.resolve_modes, ResolveModes::NESTED_URL);

    let conn = Arc::new(MockConnection::new());
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
    assert_eq!(conn.requests(), vec!["/lawyers/42/headshot.json".to_string()]);
}

#[test]
fn test_format_extension_is_configurable() {
    let conn = Arc::new(
        MockConnection::new().with_route("/lawyers/42/addresses", json!([{"id": 1}])),
    );
    let config = LifelineConfig {
        format_extension: String::new(),
        ..LifelineConfig::default()
    };
    let registry = builder_with_config(&conn, config)
        .model("Lawyer", |m| m.has_many("addresses", RelationOptions::new()))
        .model("Address", |m| m)
        .build()
        .unwrap();
    let lawyer = registry.model("Lawyer").unwrap().instantiate(attrs(json!({"id": 42})));

    assert_eq!(lawyer.has_many("addresses").unwrap().len(), 1);
}
