//! Resource models, instances and the registry that ties them together.
//!
//! - **Registry**: the models of an application and their relationship declarations
//! - **Model**: a handle to one registered model, with its lookup operations
//! - **Instance**: one fetched or constructed resource, with the relationship accessors
//! - **Identity**: identity values read from the `id` attribute
//! - **Path**: request paths for collection, singleton and member lookups

pub mod identity;
#[doc(inline)]
pub use identity::ResourceId;

pub mod instance;
#[doc(inline)]
pub use instance::ResourceInstance;

pub mod model;
#[doc(inline)]
pub use model::{FindScope, ResourceModel};

pub mod path;

pub mod registry;
#[doc(inline)]
pub use registry::{ModelBuilder, ModelRegistry, RegistryBuilder};

/// Raw attributes of a resource instance
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Lookup parameters and prefix options
pub type Params = serde_json::Map<String, serde_json::Value>;
