//! Resource model handles and their lookup operations.
//!
//! A [`ResourceModel`] is a cheap handle (registry + index) to one registered
//! model. It knows how to address its resources and how to turn response
//! bodies into [`ResourceInstance`]s; the actual request goes through the
//! registry's [`Connection`](crate::connection::Connection).

use crate::config::LifelineConfig;
use crate::error::{LifelineError, Result};
use crate::inflect;
use crate::relation::{Related, Relationship};
use crate::resource::registry::{ModelDef, ModelRegistry};
use crate::resource::{path, Attributes, Params, ResourceId, ResourceInstance};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "metrics")]
use std::time::Instant;

/// Whether a generic lookup expects one resource or a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindScope {
    /// A single (singleton) resource
    One,
    /// A collection
    All,
}

impl fmt::Display for FindScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FindScope::One => "one",
            FindScope::All => "all",
        })
    }
}

/// Handle to a registered resource model
#[derive(Clone)]
pub struct ResourceModel {
    registry: Arc<ModelRegistry>,
    index: usize,
}

impl ResourceModel {
    pub(crate) fn new(registry: Arc<ModelRegistry>, index: usize) -> Self {
        Self { registry, index }
    }

    fn def(&self) -> &ModelDef {
        self.registry.def(self.index)
    }

    /// Qualified name (`Api::Lawyer`)
    pub fn name(&self) -> &str {
        &self.def().name
    }

    /// Last segment of the name (`Lawyer`)
    pub fn simple_name(&self) -> &str {
        inflect::demodulize(self.name())
    }

    /// Path segment of a single resource (`lawyer`)
    pub fn element_name(&self) -> &str {
        &self.def().element_name
    }

    /// Path segment of the collection (`lawyers`)
    pub fn collection_name(&self) -> &str {
        &self.def().collection_name
    }

    /// The registry this model belongs to
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Configuration of the registry
    pub fn config(&self) -> &LifelineConfig {
        self.registry.config()
    }

    /// Relationships declared on this model, in declaration order
    pub fn relationships(&self) -> impl Iterator<Item = &dyn Relationship> + '_ {
        self.def().relationships.iter().map(|r| r.as_ref())
    }

    /// The relationship declared under `attribute`
    pub fn relationship(&self, attribute: &str) -> Option<&dyn Relationship> {
        self.relationship_index(attribute)
            .map(|index| self.relationship_at(index))
    }

    pub(crate) fn relationship_count(&self) -> usize {
        self.def().relationships.len()
    }

    pub(crate) fn relationship_index(&self, attribute: &str) -> Option<usize> {
        self.def()
            .relationships
            .iter()
            .position(|r| r.attribute() == attribute)
    }

    pub(crate) fn relationship_at(&self, index: usize) -> &dyn Relationship {
        self.def().relationships[index].as_ref()
    }

    /// Look up a model by name relative to this model's namespace
    pub fn relative_lookup(&self, name: &str) -> Result<ResourceModel> {
        self.registry.relative_lookup(self.name(), name)
    }

    /// Build an instance from attributes, with no prefix options
    pub fn instantiate(&self, attributes: Attributes) -> ResourceInstance {
        ResourceInstance::new(self.clone(), attributes, Params::new())
    }

    /// Build an instance that lives under the given prefix options
    pub fn instantiate_nested(
        &self,
        attributes: Attributes,
        prefix_options: Params,
    ) -> ResourceInstance {
        ResourceInstance::new(self.clone(), attributes, prefix_options)
    }

    /// Fetch a single resource from a literal URL
    pub fn find_one_by_url(&self, url: &str) -> Result<Option<ResourceInstance>> {
        match self.get(url)? {
            Some(body) => self.instantiate_record(body, Params::new()),
            None => Ok(None),
        }
    }

    /// Fetch a collection from a literal URL; not-found is an empty collection
    pub fn find_all_by_url(&self, url: &str) -> Result<Vec<ResourceInstance>> {
        Ok(self.fetch_all_by_url(url)?.unwrap_or_default())
    }

    /// Fetch a collection from a literal URL, keeping not-found (`None`) apart from empty
    pub fn fetch_all_by_url(&self, url: &str) -> Result<Option<Vec<ResourceInstance>>> {
        self.get(url)?
            .map(|body| self.instantiate_collection(body, &Params::new()))
            .transpose()
    }

    /// Generic lookup addressed by `params`
    ///
    /// Every `<parent>_id` parameter nests the request under that parent;
    /// the rest goes to the query string. `One` addresses a singleton
    /// (`/lawyers/42/headshot.json`), `All` a collection
    /// (`/lawyers/42/addresses.json`).
    pub fn find(&self, scope: FindScope, params: &Params) -> Result<Related> {
        match scope {
            FindScope::One => self.find_one(params).map(Related::One),
            FindScope::All => self.find_all(params).map(Related::Many),
        }
    }

    /// Singleton lookup; `None` when the remote reports not-found
    pub fn find_one(&self, params: &Params) -> Result<Option<ResourceInstance>> {
        let path = path::singleton_path(
            self.element_name(),
            params,
            &self.config().format_extension,
        );
        match self.get(&path)? {
            Some(body) => self.instantiate_record(body, path::prefix_params(params)),
            None => Ok(None),
        }
    }

    /// Collection lookup; empty when the remote reports not-found
    pub fn find_all(&self, params: &Params) -> Result<Vec<ResourceInstance>> {
        let path = path::collection_path(
            self.collection_name(),
            params,
            &self.config().format_extension,
        );
        match self.get(&path)? {
            Some(body) => self.instantiate_collection(body, &path::prefix_params(params)),
            None => Ok(Vec::new()),
        }
    }

    /// Member lookup by identity, nested under `prefix_options`
    pub fn find_by_id(
        &self,
        id: impl Into<ResourceId>,
        prefix_options: &Params,
    ) -> Result<Option<ResourceInstance>> {
        let id = id.into();
        let path = path::element_path(
            self.collection_name(),
            &id,
            prefix_options,
            &self.config().format_extension,
        );
        match self.get(&path)? {
            Some(body) => self.instantiate_record(body, path::prefix_params(prefix_options)),
            None => Ok(None),
        }
    }

    fn get(&self, path: &str) -> Result<Option<Value>> {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("resource.fetch", model = %self.name(), path = %path).entered();
        #[cfg(feature = "metrics")]
        let started = Instant::now();

        let result = self.registry.connection().get(path);

        #[cfg(feature = "metrics")]
        METRICS.record_fetch(started.elapsed());
        match &result {
            Ok(Some(_)) => log::trace!("{} fetched {}", self.name(), path),
            Ok(None) => log::trace!("{} not found at {}", self.name(), path),
            Err(e) => log::debug!("{} failed to fetch {}: {}", self.name(), path, e),
        }
        result
    }

    fn instantiate_record(
        &self,
        body: Value,
        prefix_options: Params,
    ) -> Result<Option<ResourceInstance>> {
        match body {
            Value::Object(attributes) => {
                Ok(Some(self.instantiate_nested(attributes, prefix_options)))
            }
            Value::Null => Ok(None),
            other => Err(LifelineError::Decode(format!(
                "expected a {} object, got {}",
                self.name(),
                kind_of(&other)
            ))),
        }
    }

    fn instantiate_collection(
        &self,
        body: Value,
        prefix_options: &Params,
    ) -> Result<Vec<ResourceInstance>> {
        match body {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(attributes) => {
                        Ok(self.instantiate_nested(attributes, prefix_options.clone()))
                    }
                    other => Err(LifelineError::Decode(format!(
                        "expected {} objects in collection, got {}",
                        self.name(),
                        kind_of(&other)
                    ))),
                })
                .collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(LifelineError::Decode(format!(
                "expected a {} collection, got {}",
                self.name(),
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Debug for ResourceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceModel").field(&self.name()).finish()
    }
}

impl PartialEq for ResourceModel {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry) && self.index == other.index
    }
}

impl Eq for ResourceModel {}
