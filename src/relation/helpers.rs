//! Helper functions shared by both relationship kinds.
//!
//! This module derives the two inputs of the resolution strategies: the
//! literal URL stored under `<attribute>_url`, and the parameters of a
//! nested lookup (`prefix options + {<owner>_id: owner.id}`).

use crate::inflect;
use crate::relation::RelationType;
use crate::resource::{Params, ResourceInstance};
use serde_json::Value;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

/// One of the two ways of locating a related resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Follow the owner's `<attribute>_url`
    UrlProperty,
    /// Build a nested address from the owner's identity
    NestedUrl,
}

impl Strategy {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::UrlProperty => "url_property",
            Strategy::NestedUrl => "nested_url",
        }
    }
}

/// Attribute key holding the literal URL of a relationship (`headshot` -> `headshot_url`)
pub fn url_property_key(attribute: &str) -> String {
    format!("{}_url", attribute)
}

/// The literal URL of a relationship, if the owner carries a non-empty one
pub fn url_property<'a>(owner: &'a ResourceInstance, attribute: &str) -> Option<&'a str> {
    match owner.attribute(&url_property_key(attribute)) {
        Some(Value::String(url)) if !url.trim().is_empty() => Some(url.as_str()),
        _ => None,
    }
}

/// Parameter naming the owner in a nested lookup (`Api::LawFirm` -> `law_firm_id`)
pub fn id_attribute_name(owner_model: &str) -> String {
    format!("{}_id", inflect::underscore(inflect::demodulize(owner_model)))
}

/// Parameters of a nested lookup: the owner's prefix options plus `{id_attribute: owner.id}`
///
/// The owner's `id` attribute is passed through unchanged. An owner without
/// one still gets its lookup, with a `null` id that ends up as a bare query
/// key instead of a path segment.
pub fn nested_params(owner: &ResourceInstance, id_attribute: &str) -> Params {
    let id = owner.attribute("id").cloned().unwrap_or(Value::Null);
    if id.is_null() {
        log::debug!(
            "{} instance has no id, nesting under a null {}",
            owner.model().name(),
            id_attribute
        );
    }
    let mut params = owner.prefix_options().clone();
    params.insert(id_attribute.to_string(), id);
    params
}

/// Log (and count, with the `metrics` feature) the outcome of one strategy
pub(crate) fn record_attempt(rel_type: RelationType, strategy: Strategy, found: bool) {
    log::debug!(
        "{:?} {} strategy {}",
        rel_type,
        strategy.as_str(),
        if found { "found a value" } else { "found nothing" }
    );
    #[cfg(feature = "metrics")]
    METRICS.record_resolution(rel_type, strategy.as_str(), found);
}
