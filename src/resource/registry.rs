//! Registry of resource models and their relationship declarations.
//!
//! Models are declared once, at application start, through a
//! [`RegistryBuilder`]. Each declaration names the model and lists its
//! relationships; building the registry freezes everything. Related models
//! are found by name in the registry, walking outwards through the owner's
//! namespace the way nested names resolve (`Api::Lawyer` looking for
//! `Headshot` tries `Api::Lawyer::Headshot`, `Api::Headshot`, `Headshot`).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lifeline::{LifelineConfig, MockConnection, ModelRegistry, RelationOptions};
//!
//! let registry = ModelRegistry::builder(
//!     Arc::new(LifelineConfig::default()),
//!     Arc::new(MockConnection::new()),
//! )
//! .model("Lawyer", |m| {
//!     m.has_one("headshot", RelationOptions::new())
//!         .has_many("addresses", RelationOptions::new())
//! })
//! .model("Headshot", |m| m)
//! .model("Address", |m| m)
//! .build()
//! .unwrap();
//!
//! registry.validate().unwrap();
//! assert_eq!(registry.model("Lawyer").unwrap().collection_name(), "lawyers");
//! ```

use crate::config::LifelineConfig;
use crate::connection::Connection;
use crate::error::{LifelineError, Result};
use crate::inflect;
use crate::relation::{HasMany, HasOne, RelationOptions, Relationship};
use crate::resource::ResourceModel;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Frozen set of models sharing one configuration and connection
pub struct ModelRegistry {
    config: Arc<LifelineConfig>,
    connection: Arc<dyn Connection>,
    models: Vec<ModelDef>,
    by_name: HashMap<String, usize>,
}

/// Declaration of one model
#[derive(Debug)]
pub(crate) struct ModelDef {
    pub(crate) name: String,
    pub(crate) element_name: String,
    pub(crate) collection_name: String,
    pub(crate) relationships: Vec<Box<dyn Relationship>>,
}

impl ModelRegistry {
    /// Start declaring models
    pub fn builder(
        config: Arc<LifelineConfig>,
        connection: Arc<dyn Connection>,
    ) -> RegistryBuilder {
        RegistryBuilder::new(config, connection)
    }

    /// Configuration shared by all models
    pub fn config(&self) -> &LifelineConfig {
        &self.config
    }

    /// Connection shared by all models
    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is registered
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Look up a model by its absolute name (a leading `::` is ignored)
    pub fn model(self: &Arc<Self>, name: &str) -> Result<ResourceModel> {
        let name = name.trim_start_matches("::");
        self.by_name
            .get(name)
            .map(|&index| ResourceModel::new(Arc::clone(self), index))
            .ok_or_else(|| LifelineError::UnknownModel(name.to_string()))
    }

    /// All registered models, in declaration order
    pub fn models(self: &Arc<Self>) -> impl Iterator<Item = ResourceModel> + '_ {
        (0..self.models.len()).map(move |index| ResourceModel::new(Arc::clone(self), index))
    }

    /// Look up `name` relative to the namespace of `owner`
    ///
    /// Candidates are tried from the innermost scope outwards, ending with
    /// the bare name. A name starting with `::` is absolute.
    ///
    /// # Errors
    ///
    /// [`LifelineError::NameResolution`] if no candidate is registered.
    pub fn relative_lookup(self: &Arc<Self>, owner: &str, name: &str) -> Result<ResourceModel> {
        if let Some(absolute) = name.strip_prefix("::") {
            return self.model(absolute).map_err(|_| LifelineError::NameResolution {
                name: name.to_string(),
                owner: owner.to_string(),
            });
        }

        let mut scope = Some(owner);
        while let Some(namespace) = scope {
            let candidate = format!("{}::{}", namespace, name);
            if let Some(&index) = self.by_name.get(&candidate) {
                return Ok(ResourceModel::new(Arc::clone(self), index));
            }
            scope = inflect::deconstantize(namespace);
        }

        self.by_name
            .get(name)
            .map(|&index| ResourceModel::new(Arc::clone(self), index))
            .ok_or_else(|| LifelineError::NameResolution {
                name: name.to_string(),
                owner: owner.to_string(),
            })
    }

    /// Check that every declared relationship can find its related model
    ///
    /// Resolution looks related models up lazily, so a typo in a
    /// declaration only shows when the accessor is first used. Calling this
    /// after [`RegistryBuilder::build`] reports it at start-up instead.
    pub fn validate(self: &Arc<Self>) -> Result<()> {
        for owner in self.models() {
            for relationship in owner.relationships() {
                relationship.related_model(&owner)?;
            }
        }
        Ok(())
    }

    pub(crate) fn def(&self, index: usize) -> &ModelDef {
        &self.models[index]
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("config", &self.config)
            .field("models", &self.models)
            .finish()
    }
}

/// Collects model declarations until [`RegistryBuilder::build`]
pub struct RegistryBuilder {
    config: Arc<LifelineConfig>,
    connection: Arc<dyn Connection>,
    models: Vec<ModelBuilder>,
}

impl RegistryBuilder {
    /// Start an empty registry using `config` and `connection`
    pub fn new(config: Arc<LifelineConfig>, connection: Arc<dyn Connection>) -> Self {
        Self {
            config,
            connection,
            models: Vec::new(),
        }
    }

    /// Declare a model; `declare` adds its relationships and naming overrides
    pub fn model<F>(mut self, name: impl Into<String>, declare: F) -> Self
    where
        F: FnOnce(ModelBuilder) -> ModelBuilder,
    {
        self.models.push(declare(ModelBuilder::new(name.into())));
        self
    }

    /// Freeze the declarations
    ///
    /// # Errors
    ///
    /// [`LifelineError::DuplicateModel`] or [`LifelineError::DuplicateRelation`]
    /// when a name is declared twice.
    pub fn build(self) -> Result<Arc<ModelRegistry>> {
        let mut models = Vec::with_capacity(self.models.len());
        let mut by_name = HashMap::with_capacity(self.models.len());

        for builder in self.models {
            let def = builder.into_def()?;
            if by_name.insert(def.name.clone(), models.len()).is_some() {
                return Err(LifelineError::DuplicateModel(def.name));
            }
            log::debug!(
                "registered model {} ({} relationship(s))",
                def.name,
                def.relationships.len()
            );
            models.push(def);
        }

        Ok(Arc::new(ModelRegistry {
            config: self.config,
            connection: self.connection,
            models,
            by_name,
        }))
    }
}

/// Declaration of one model inside a [`RegistryBuilder`]
pub struct ModelBuilder {
    name: String,
    element_name: Option<String>,
    collection_name: Option<String>,
    relationships: Vec<Box<dyn Relationship>>,
}

impl ModelBuilder {
    fn new(name: String) -> Self {
        Self {
            name: name.trim_start_matches("::").to_string(),
            element_name: None,
            collection_name: None,
            relationships: Vec::new(),
        }
    }

    /// Path segment of a single resource (defaults to the underscored simple name)
    pub fn element_name(mut self, name: impl Into<String>) -> Self {
        self.element_name = Some(name.into());
        self
    }

    /// Path segment of the collection (defaults to the pluralised element name)
    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = Some(name.into());
        self
    }

    /// Declare a relationship to at most one related resource
    pub fn has_one(mut self, attribute: impl Into<String>, options: RelationOptions) -> Self {
        let relationship = HasOne::new(self.name.clone(), attribute, options);
        self.relationships.push(Box::new(relationship));
        self
    }

    /// Declare a relationship to a collection of related resources
    pub fn has_many(mut self, attribute: impl Into<String>, options: RelationOptions) -> Self {
        let relationship = HasMany::new(self.name.clone(), attribute, options);
        self.relationships.push(Box::new(relationship));
        self
    }

    fn into_def(self) -> Result<ModelDef> {
        let mut seen = HashSet::new();
        for relationship in &self.relationships {
            if !seen.insert(relationship.attribute()) {
                return Err(LifelineError::DuplicateRelation {
                    model: self.name.clone(),
                    attribute: relationship.attribute().to_string(),
                });
            }
        }

        let element_name = self
            .element_name
            .unwrap_or_else(|| inflect::underscore(inflect::demodulize(&self.name)));
        let collection_name = self
            .collection_name
            .unwrap_or_else(|| inflect::pluralize(&element_name));

        Ok(ModelDef {
            name: self.name,
            element_name,
            collection_name,
            relationships: self.relationships,
        })
    }
}
