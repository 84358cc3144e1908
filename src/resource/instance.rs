//! Resource instances and their relationship accessors.

use crate::error::{LifelineError, Result};
use crate::relation::{LazyRelations, Related, RelationType};
use crate::resource::{Attributes, Params, ResourceId, ResourceModel};
use serde_json::Value;
use std::fmt;

/// One fetched or constructed resource
///
/// Holds the raw attributes, the prefix options that address it (the
/// `<parent>_id` values it was found under) and one cache slot per
/// relationship declared on its model.
///
/// Relationship accessors resolve on first use and return the cached value
/// afterwards, including a cached "nothing". An error leaves the slot
/// unresolved. The cache is not thread-safe: an instance can be moved to
/// another thread but not shared between threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lifeline::{LifelineConfig, MockConnection, ModelRegistry, RelationOptions};
/// use serde_json::json;
///
/// let conn = Arc::new(
///     MockConnection::new()
///         .with_route("/headshots/5", json!({"id": 5, "style": "formal"}))
///         .with_route("/lawyers/42/addresses.json", json!([{"id": 1}, {"id": 2}])),
/// );
/// let registry = ModelRegistry::builder(Arc::new(LifelineConfig::default()), conn.clone())
///     .model("Lawyer", |m| {
///         m.has_one("headshot", RelationOptions::new())
///             .has_many("addresses", RelationOptions::new())
///     })
///     .model("Headshot", |m| m)
///     .model("Address", |m| m)
///     .build()
///     .unwrap();
///
/// let lawyer = registry.model("Lawyer").unwrap().instantiate(
///     json!({"id": 42, "headshot_url": "/headshots/5"}).as_object().unwrap().clone(),
/// );
///
/// let headshot = lawyer.has_one("headshot").unwrap().unwrap();
/// assert_eq!(headshot.attribute("style"), Some(&json!("formal")));
/// assert_eq!(lawyer.has_many("addresses").unwrap().len(), 2);
///
/// // Cached: no further requests.
/// lawyer.has_many("addresses").unwrap();
/// assert_eq!(conn.requests().len(), 2);
/// ```
#[derive(Clone)]
pub struct ResourceInstance {
    model: ResourceModel,
    attributes: Attributes,
    prefix_options: Params,
    relations: LazyRelations,
}

impl ResourceInstance {
    pub(crate) fn new(
        model: ResourceModel,
        attributes: Attributes,
        prefix_options: Params,
    ) -> Self {
        let relations = LazyRelations::new(model.relationship_count());
        Self {
            model,
            attributes,
            prefix_options,
            relations,
        }
    }

    /// Model this instance belongs to
    pub fn model(&self) -> &ResourceModel {
        &self.model
    }

    /// Raw attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// One raw attribute
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Path parameters addressing this instance under its parents
    pub fn prefix_options(&self) -> &Params {
        &self.prefix_options
    }

    /// Identity read from the `id` attribute, if it holds one
    pub fn id(&self) -> Option<ResourceId> {
        self.attributes.get("id").and_then(ResourceId::from_value)
    }

    /// Resolved value of the relationship declared under `attribute`
    ///
    /// # Errors
    ///
    /// [`LifelineError::UnknownRelation`] if nothing is declared under
    /// `attribute`, otherwise whatever resolution reports.
    pub fn relation(&self, attribute: &str) -> Result<&Related> {
        let index = self.model.relationship_index(attribute).ok_or_else(|| {
            LifelineError::UnknownRelation {
                model: self.model.name().to_string(),
                attribute: attribute.to_string(),
            }
        })?;

        if let Some(cached) = self.relations.get(index) {
            log::trace!("{}#{} served from cache", self.model.name(), attribute);
            return Ok(cached);
        }

        self.relations
            .get_or_resolve(index, || self.model.relationship_at(index).resolve(self))
    }

    /// Related instance of a `has_one` relationship
    ///
    /// # Errors
    ///
    /// [`LifelineError::RelationKind`] if `attribute` is a `has_many`.
    pub fn has_one(&self, attribute: &str) -> Result<Option<&ResourceInstance>> {
        self.expect_kind(attribute, RelationType::HasOne)?;
        match self.relation(attribute)? {
            Related::One(found) => Ok(found.as_ref()),
            Related::Many(_) => Err(self.kind_error(
                attribute,
                RelationType::HasOne,
                RelationType::HasMany,
            )),
        }
    }

    /// Related instances of a `has_many` relationship
    ///
    /// # Errors
    ///
    /// [`LifelineError::RelationKind`] if `attribute` is a `has_one`.
    pub fn has_many(&self, attribute: &str) -> Result<&[ResourceInstance]> {
        self.expect_kind(attribute, RelationType::HasMany)?;
        match self.relation(attribute)? {
            Related::Many(found) => Ok(found),
            Related::One(_) => Err(self.kind_error(
                attribute,
                RelationType::HasMany,
                RelationType::HasOne,
            )),
        }
    }

    /// Whether the relationship under `attribute` has been resolved on this instance
    pub fn is_relation_loaded(&self, attribute: &str) -> bool {
        self.model
            .relationship_index(attribute)
            .is_some_and(|index| self.relations.is_loaded(index))
    }

    fn expect_kind(&self, attribute: &str, expected: RelationType) -> Result<()> {
        match self.model.relationship(attribute) {
            Some(relationship) if relationship.rel_type() != expected => {
                Err(self.kind_error(attribute, expected, relationship.rel_type()))
            }
            _ => Ok(()),
        }
    }

    fn kind_error(
        &self,
        attribute: &str,
        expected: RelationType,
        actual: RelationType,
    ) -> LifelineError {
        LifelineError::RelationKind {
            model: self.model.name().to_string(),
            attribute: attribute.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Debug for ResourceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded: Vec<&str> = self
            .model
            .relationships()
            .enumerate()
            .filter(|(index, _)| self.relations.is_loaded(*index))
            .map(|(_, relationship)| relationship.attribute())
            .collect();
        f.debug_struct("ResourceInstance")
            .field("model", &self.model.name())
            .field("attributes", &self.attributes)
            .field("prefix_options", &self.prefix_options)
            .field("loaded_relations", &loaded)
            .finish()
    }
}
