//! Core traits for resource relationships.
//!
//! This module provides the [`Relationship`] trait implemented by
//! [`HasOne`](crate::relation::HasOne) and [`HasMany`](crate::relation::HasMany),
//! and the [`Related`] value a resolution produces.

use crate::config::{LifelineConfig, ResolveModes};
use crate::error::{LifelineError, Result};
use crate::relation::options::RelationOptions;
use crate::resource::{ResourceInstance, ResourceModel};
use std::fmt;

/// Cardinality of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// At most one related resource
    HasOne,
    /// A collection of related resources
    HasMany,
}

/// The resolved value of a relationship
///
/// `One(None)` and an empty `Many` are real results ("nothing related"),
/// cached like any other.
#[derive(Debug, Clone)]
pub enum Related {
    /// Result of a `has_one` relationship
    One(Option<ResourceInstance>),
    /// Result of a `has_many` relationship
    Many(Vec<ResourceInstance>),
}

impl Related {
    /// Cardinality of the relationship that produced this value
    pub fn rel_type(&self) -> RelationType {
        match self {
            Related::One(_) => RelationType::HasOne,
            Related::Many(_) => RelationType::HasMany,
        }
    }

    /// The related instance of a `has_one` result
    pub fn one(&self) -> Option<&ResourceInstance> {
        match self {
            Related::One(found) => found.as_ref(),
            Related::Many(_) => None,
        }
    }

    /// The related instances of a `has_many` result
    pub fn many(&self) -> Option<&[ResourceInstance]> {
        match self {
            Related::One(_) => None,
            Related::Many(found) => Some(found),
        }
    }

    /// Number of related instances
    pub fn len(&self) -> usize {
        match self {
            Related::One(found) => usize::from(found.is_some()),
            Related::Many(found) => found.len(),
        }
    }

    /// Whether nothing is related
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the related instances whatever the cardinality
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceInstance> {
        match self {
            Related::One(found) => found.as_slice().iter(),
            Related::Many(found) => found.iter(),
        }
    }
}

/// A relationship declared on a resource model
///
/// A relationship only carries its declaration: the owner model's name, the
/// attribute it is declared under and its [`RelationOptions`]. The related
/// model and the effective resolve modes are worked out again on every
/// resolution.
pub trait Relationship: Send + Sync + fmt::Debug {
    /// Cardinality of this relationship
    fn rel_type(&self) -> RelationType;

    /// Qualified name of the model the relationship is declared on
    fn owner_model(&self) -> &str;

    /// Attribute name, used for the accessor, the `<attribute>_url` key and name derivation
    fn attribute(&self) -> &str;

    /// Declaration options
    fn options(&self) -> &RelationOptions;

    /// Related model name derived from the attribute (relative to the owner's namespace)
    fn derived_class_name(&self) -> String;

    /// Effective strategy flags for this relationship
    fn resolve_modes(&self, config: &LifelineConfig) -> ResolveModes;

    /// Locate and fetch the related resource(s) for `owner`
    ///
    /// # Errors
    ///
    /// [`LifelineError::NameResolution`] when the related model is not
    /// registered, plus whatever the connection reports. Not-found is never
    /// an error: it resolves to `Related::One(None)` / an empty `Related::Many`.
    fn resolve(&self, owner: &ResourceInstance) -> Result<Related>;

    /// Look up the related model
    ///
    /// An explicit `class_name` is used verbatim as an absolute name and the
    /// attribute-derived name is never consulted. Otherwise the derived name
    /// is looked up relative to the owner's namespace.
    fn related_model(&self, owner: &ResourceModel) -> Result<ResourceModel> {
        match &self.options().class_name {
            Some(name) => owner.registry().model(name).map_err(|_| {
                LifelineError::NameResolution {
                    name: name.clone(),
                    owner: owner.name().to_string(),
                }
            }),
            None => owner.relative_lookup(&self.derived_class_name()),
        }
    }

    /// The "nothing related" value for this cardinality
    fn empty(&self) -> Related {
        match self.rel_type() {
            RelationType::HasOne => Related::One(None),
            RelationType::HasMany => Related::Many(Vec::new()),
        }
    }
}
