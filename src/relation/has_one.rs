//! `has_one` relationships.
//!
//! Resolution tries, in order, stopping at the first value:
//! 1. the owner's `<attribute>_url`, fetched with `find_one_by_url`
//! 2. a nested lookup, `find(One, prefix_options + {<owner>_id: owner.id})`
//!
//! and resolves to `None` when neither produces anything. Without a
//! `resolve_modes` override the registry's configured default applies.

use crate::config::{LifelineConfig, ResolveModes};
use crate::error::Result;
use crate::inflect;
use crate::relation::helpers::{self, Strategy};
use crate::relation::{Related, RelationOptions, RelationType, Relationship};
use crate::resource::{FindScope, ResourceInstance};

/// A "has one" relationship (e.g. `Lawyer` has one `headshot`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasOne {
    owner_model: String,
    attribute: String,
    options: RelationOptions,
}

impl HasOne {
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

impl Relationship for HasOne {
    fn rel_type(&self) -> RelationType {
        RelationType::HasOne
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

    fn derived_class_name(&self) -> String {
        inflect::camelize(&self.attribute)
    }

    fn resolve_modes(&self, config: &LifelineConfig) -> ResolveModes {
        self.options.resolve_modes.unwrap_or(config.resolve_modes)
    }

    fn resolve(&self, owner: &ResourceInstance) -> Result<Related> {
        let owner_model = owner.model();
        let modes = self.resolve_modes(owner_model.config());

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "relation.resolve",
            kind = "has_one",
            model = %self.owner_model,
            attribute = %self.attribute,
        )
        .entered();

        if modes.use_url_property {
            if let Some(url) = helpers::url_property(owner, &self.attribute) {
                let found = self.related_model(owner_model)?.find_one_by_url(url)?;
                helpers::record_attempt(
                    RelationType::HasOne,
                    Strategy::UrlProperty,
                    found.is_some(),
                );
                if found.is_some() {
                    return Ok(Related::One(found));
                }
            }
        }

        if modes.use_nested_url {
            let id_attribute = helpers::id_attribute_name(&self.owner_model);
            let params = helpers::nested_params(owner, &id_attribute);
            let found = self
                .related_model(owner_model)?
                .find(FindScope::One, &params)?;
            helpers::record_attempt(RelationType::HasOne, Strategy::NestedUrl, !found.is_empty());
            return Ok(found);
        }

        Ok(self.empty())
    }
}
