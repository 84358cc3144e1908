//! Options accepted by relationship declarations.

use crate::config::ResolveModes;
use serde::{Deserialize, Serialize};

/// Overrides for a single `has_one` / `has_many` declaration
///
/// Both fields are optional. Without `class_name` the related model is
/// derived from the attribute name; without `resolve_modes` the
/// relationship kind's default applies.
///
/// # Example
///
/// ```
/// use lifeline::{RelationOptions, ResolveModes};
///
/// let options = RelationOptions::new()
///     .class_name("Media::Photo")
///     .resolve_modes(ResolveModes::URL_PROPERTY);
/// assert_eq!(options.class_name.as_deref(), Some("Media::Photo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelationOptions {
    /// Absolute name of the related model, used verbatim
    #[serde(default)]
    pub class_name: Option<String>,
    /// Strategy flags replacing the default for this relationship
    #[serde(default)]
    pub resolve_modes: Option<ResolveModes>,
}

impl RelationOptions {
    /// Options with nothing overridden
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the named model instead of deriving it from the attribute
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Use these strategy flags instead of the default
    pub fn resolve_modes(mut self, modes: ResolveModes) -> Self {
        self.resolve_modes = Some(modes);
        self
    }
}
