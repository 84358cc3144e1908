//! Shared fixtures: a small law-firm API.

use lifeline::{
    Attributes, LifelineConfig, MockConnection, ModelRegistry, RegistryBuilder, RelationOptions,
    ResourceInstance,
};
use serde_json::Value;
use std::sync::Arc;

pub fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

pub fn builder(conn: &Arc<MockConnection>) -> RegistryBuilder {
    builder_with_config(conn, LifelineConfig::default())
}

pub fn builder_with_config(conn: &Arc<MockConnection>, config: LifelineConfig) -> RegistryBuilder {
    ModelRegistry::builder(Arc::new(config), conn.clone())
}

/// `Lawyer` has one `headshot` and many `addresses`
pub fn law_firm(conn: &Arc<MockConnection>) -> Arc<ModelRegistry> {
    builder(conn)
        .model("Lawyer", |m| {
            m.has_one("headshot", RelationOptions::new())
                .has_many("addresses", RelationOptions::new())
        })
        .model("Headshot", |m| m)
        .model("Address", |m| m)
        .build()
        .unwrap()
}

pub fn lawyer(registry: &Arc<ModelRegistry>, attributes: Value) -> ResourceInstance {
    registry.model("Lawyer").unwrap().instantiate(attrs(attributes))
}
