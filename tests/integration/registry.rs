use crate::common::{builder, law_firm};
use lifeline::{LifelineError, MockConnection, RelationOptions, RelationType};
use std::sync::Arc;

#[test]
fn test_default_resource_names() {
    let conn = Arc::new(MockConnection::new());
    let registry = builder(&conn)
        .model("Api::LawFirm", |m| m)
        .model("Person", |m| m)
        .model("Office", |m| m.element_name("branch").collection_name("branches"))
        .build()
        .unwrap();

    let firm = registry.model("Api::LawFirm").unwrap();
    assert_eq!(firm.simple_name(), "LawFirm");
    assert_eq!(firm.element_name(), "law_firm");
    assert_eq!(firm.collection_name(), "law_firms");

    assert_eq!(registry.model("Person").unwrap().collection_name(), "people");
    assert_eq!(registry.model("::Office").unwrap().collection_name(), "branches");
}

#[test]
fn test_relationships_in_declaration_order() {
    let conn = Arc::new(MockConnection::new());
    let registry = law_firm(&conn);
    let lawyer = registry.model("Lawyer").unwrap();

    let declared: Vec<(&str, RelationType)> = lawyer
        .relationships()
        .map(|r| (r.attribute(), r.rel_type()))
        .collect();
    assert_eq!(
        declared,
        vec![("headshot", RelationType::HasOne), ("addresses", RelationType::HasMany)]
    );
    assert_eq!(lawyer.relationship("addresses").unwrap().derived_class_name(), "Address");
    assert!(lawyer.relationship("clients").is_none());
}

#[test]
fn test_duplicate_declarations_are_rejected() {
    let conn = Arc::new(MockConnection::new());
    let duplicate_model = builder(&conn).model("Lawyer", |m| m).model("Lawyer", |m| m).build();
    assert!(matches!(
        duplicate_model,
        Err(LifelineError::DuplicateModel(name)) if name == "Lawyer"
    ));

    let duplicate_relation = builder(&conn)
        .model("Lawyer", |m| {
            m.has_one("headshot", RelationOptions::new())
                .has_many("headshot", RelationOptions::new())
        })
        .build();
    assert!(matches!(
        duplicate_relation,
        Err(LifelineError::DuplicateRelation { attribute, .. }) if attribute == "headshot"
    ));
}

#[test]
fn test_validate_reports_missing_related_models() {
    let conn = Arc::new(MockConnection::new());
    assert!(law_firm(&conn).validate().is_ok());

    let registry = builder(&conn)
        .model("Lawyer", |m| m.has_many("addresses", RelationOptions::new()))
        .build()
        .unwrap();
    assert!(matches!(
        registry.validate(),
        Err(LifelineError::NameResolution { name, .. }) if name == "Address"
    ));
}

#[test]
fn test_relative_lookup_prefers_innermost_namespace() {
    let conn = Arc::new(MockConnection::new());
    let registry = builder(&conn)
        .model("Api::V2::Lawyer", |m| m)
        .model("Api::Address", |m| m)
        .model("Address", |m| m)
        .build()
        .unwrap();
    let lawyer = registry.model("Api::V2::Lawyer").unwrap();

    assert_eq!(lawyer.relative_lookup("Address").unwrap().name(), "Api::Address");
    assert_eq!(lawyer.relative_lookup("::Address").unwrap().name(), "Address");
    assert!(matches!(
        lawyer.relative_lookup("Headshot"),
        Err(LifelineError::NameResolution { .. })
    ));
}

#[test]
fn test_unknown_model() {
    let conn = Arc::new(MockConnection::new());
    let registry = law_firm(&conn);
    assert!(matches!(
        registry.model("Judge"),
        Err(LifelineError::UnknownModel(name)) if name == "Judge"
    ));
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.models().count(), 3);
}
