//! Relation module for resource relationships.
//!
//! This module provides the two relationship kinds a resource model can declare:
//! - has_one: the owner has at most one related resource
//! - has_many: the owner has a collection of related resources
//!
//! # Architecture
//!
//! - **Traits**: the [`Relationship`] trait shared by both kinds
//! - **Options**: per-declaration overrides (`class_name`, `resolve_modes`)
//! - **HasOne / HasMany**: the resolution algorithm for each cardinality
//! - **Lazy**: the per-instance cache slots behind the accessors
//! - **Helpers**: URL-property and nested-parameter derivation

pub mod traits;
#[doc(inline)]
pub use traits::{Related, RelationType, Relationship};

pub mod options;
#[doc(inline)]
pub use options::RelationOptions;

pub mod has_many;
pub mod has_one;
#[doc(inline)]
pub use has_many::HasMany;
#[doc(inline)]
pub use has_one::HasOne;

pub mod lazy;
#[doc(inline)]
pub use lazy::LazyRelations;

pub mod helpers;
