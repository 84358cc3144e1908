//! `has_many` relationships.
//!
//! Same strategy order as `has_one`, with collection lookups:
//! `<attribute>_url` through `find_all_by_url`, then a nested
//! `find(All, ..)`. The result is always a collection, empty when nothing
//! was found. Unlike `has_one`, the default modes are fixed (both
//! strategies on) and never read from configuration.

use crate::config::{LifelineConfig, ResolveModes};
use crate::error::Result;
use crate::inflect;
use crate::relation::helpers::{self, Strategy};
use crate::relation::{Related, RelationOptions, RelationType, Relationship};
use crate::resource::{FindScope, ResourceInstance};

/// A "has many" relationship (e.g. `Lawyer` has many `addresses`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasMany {
    owner_model: String,
    attribute: String,
    options: RelationOptions,
}

impl HasMany {
    /// Modes used when the declaration has no override
    pub const DEFAULT_RESOLVE_MODES: ResolveModes = ResolveModes::ALL;

    /// Declare `attribute` on `owner_model`
    pub fn new(
        owner_model: impl Into<String>,
        attribute: impl Into<String>,
        options: RelationOptions,
    ) -> Self {
        Self {
            owner_model: owner_model.into(),
            attribute: attribute.into(),
            options,
        }
    }
}

impl Relationship for HasMany {
    fn rel_type(&self) -> RelationType {
        RelationType::HasMany
    }

    fn owner_model(&self) -> &str {
        &self.owner_model
    }

    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn options(&self) -> &RelationOptions {
        &self.options
    }

    /// The attribute names a collection, the model is singular (`lawyers` -> `Lawyer`)
    fn derived_class_name(&self) -> String {
        inflect::camelize(&inflect::singularize(&self.attribute))
    }

    fn resolve_modes(&self, _config: &LifelineConfig) -> ResolveModes {
        self.options
            .resolve_modes
            .unwrap_or(Self::DEFAULT_RESOLVE_MODES)
    }

    fn resolve(&self, owner: &ResourceInstance) -> Result<Related> {
        let owner_model = owner.model();
        let modes = self.resolve_modes(owner_model.config());

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "relation.resolve",
            kind = "has_many",
            model = %self.owner_model,
            attribute = %self.attribute,
        )
        .entered();

        if modes.use_url_property {
            if let Some(url) = helpers::url_property(owner, &self.attribute) {
                let found = self.related_model(owner_model)?.fetch_all_by_url(url)?;
                helpers::record_attempt(
                    RelationType::HasMany,
                    Strategy::UrlProperty,
                    found.is_some(),
                );
                if let Some(found) = found {
                    return Ok(Related::Many(found));
                }
            }
        }

        if modes.use_nested_url {
            let id_attribute = helpers::id_attribute_name(&self.owner_model);
            let params = helpers::nested_params(owner, &id_attribute);
            let found = self
                .related_model(owner_model)?
                .find(FindScope::All, &params)?;
            helpers::record_attempt(
                RelationType::HasMany,
                Strategy::NestedUrl,
                !found.is_empty(),
            );
            return Ok(found);
        }

        Ok(self.empty())
    }
}
