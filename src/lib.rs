//! # Lifeline
//!
//! Read-only relationships between REST resources.
//!
//! A model declares `has_one` and `has_many` relationships. Reading one on an
//! instance resolves it lazily, first through a `<attribute>_url` attribute
//! of the instance, then through a lookup nested under the owner
//! (`/lawyers/42/addresses.json`). The outcome, including "nothing found", is
//! cached on the instance.
//!
//! ```
//! use std::sync::Arc;
//! use lifeline::{LifelineConfig, MockConnection, ModelRegistry, RelationOptions};
//! use serde_json::json;
//!
//! let conn = Arc::new(
//!     MockConnection::new().with_route("/lawyers/42/addresses.json", json!([{"id": 1}])),
//! );
//! let registry = ModelRegistry::builder(Arc::new(LifelineConfig::default()), conn)
//!     .model("Lawyer", |m| m.has_many("addresses", RelationOptions::new()))
//!     .model("Address", |m| m)
//!     .build()?;
//! registry.validate()?;
//!
//! let lawyer = registry
//!     .model("Lawyer")?
//!     .instantiate(json!({"id": 42}).as_object().cloned().unwrap_or_default());
//! assert_eq!(lawyer.has_many("addresses")?.len(), 1);
//! # Ok::<(), lifeline::LifelineError>(())
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod inflect;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod relation;
pub mod resource;

pub use config::{LifelineConfig, ResolveModes};
#[cfg(feature = "http")]
pub use connection::HttpConnection;
pub use connection::{Connection, MockConnection};
pub use error::{is_not_found, LifelineError, Result};
pub use relation::{HasMany, HasOne, Related, RelationOptions, RelationType, Relationship};
pub use resource::{
    Attributes, FindScope, ModelBuilder, ModelRegistry, Params, RegistryBuilder, ResourceId,
    ResourceInstance, ResourceModel,
};
