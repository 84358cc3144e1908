//! Error types for relationship resolution and resource fetching.
//!
//! Only genuine failures live here. A remote "not found" is not an error:
//! connections report it as `Ok(None)` and the resolution strategies treat it
//! as a signal to try the next strategy.

use crate::relation::RelationType;
use thiserror::Error;

/// Error type for all lifeline operations
#[derive(Debug, Error)]
pub enum LifelineError {
    /// A related model name (explicit or derived) is not registered
    #[error("cannot resolve model `{name}` from `{owner}`")]
    NameResolution {
        /// The name that was looked up
        name: String,
        /// The model the lookup started from
        owner: String,
    },
    /// A model was requested by absolute name and is not registered
    #[error("model `{0}` is not registered")]
    UnknownModel(String),
    /// The same model name was registered twice
    #[error("model `{0}` is registered more than once")]
    DuplicateModel(String),
    /// An accessor was called for an attribute with no declared relationship
    #[error("`{model}` has no relationship named `{attribute}`")]
    UnknownRelation { model: String, attribute: String },
    /// The same attribute was declared twice on one model
    #[error("relationship `{attribute}` is declared more than once on `{model}`")]
    DuplicateRelation { model: String, attribute: String },
    /// A typed accessor was used against a relationship of the other cardinality
    #[error("relationship `{attribute}` on `{model}` is {actual:?}, not {expected:?}")]
    RelationKind {
        model: String,
        attribute: String,
        expected: RelationType,
        actual: RelationType,
    },
    /// A URL or site setting could not be parsed
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The remote answered with a non-success status other than not-found
    #[error("remote returned status {status} for {url}")]
    Status { status: u16, url: String },
    /// Network-level failure reported by the transport
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body does not have the expected shape
    #[error("cannot decode response: {0}")]
    Decode(String),
    /// The response body is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LifelineError>;

/// Check whether an error is a remote "not found".
///
/// The bundled connections use this to fold a 404 into `Ok(None)` before it
/// reaches the resolution strategies. Every other status, and every
/// transport or decode failure, is a real error and propagates unchanged.
pub fn is_not_found(error: &LifelineError) -> bool {
    matches!(error, LifelineError::Status { status: 404, .. })
}
