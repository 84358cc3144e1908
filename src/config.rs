//! Client configuration.
//!
//! [`LifelineConfig`] is loaded once at application start, typically with
//! [`LifelineConfig::load`], and handed to the model registry inside an
//! `Arc`. Nothing in the crate reads configuration from global state.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

type ConfigFile = File<config::FileSourceFile, config::FileFormat>;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config/config.toml";

/// Section of the configuration file holding the lifeline settings
pub const CONFIG_SECTION: &str = "lifeline";

/// Prefix of the environment variables that override file settings
pub const ENV_PREFIX: &str = "LIFELINE";

/// Which strategies a relationship may use to locate its target
///
/// Both flags are independent. With both off a relationship never fetches
/// anything and always resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolveModes {
    /// Follow a literal `<attribute>_url` found on the owner's attributes
    #[serde(default = "default_true")]
    pub use_url_property: bool,
    /// Build a nested address from the owner's identity and prefix options
    #[serde(default = "default_true")]
    pub use_nested_url: bool,
}

impl ResolveModes {
    /// Both strategies enabled
    pub const ALL: Self = Self::new(true, true);
    /// Only the `<attribute>_url` strategy
    pub const URL_PROPERTY: Self = Self::new(true, false);
    /// Only the nested-address strategy
    pub const NESTED_URL: Self = Self::new(false, true);
    /// No strategy at all
    pub const NONE: Self = Self::new(false, false);

    /// Create a set of resolution flags
    pub const fn new(use_url_property: bool, use_nested_url: bool) -> Self {
        Self {
            use_url_property,
            use_nested_url,
        }
    }
}

impl Default for ResolveModes {
    fn default() -> Self {
        Self::ALL
    }
}

/// Settings shared by every model in a registry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LifelineConfig {
    /// Base URL that relative resource paths are joined to
    #[serde(default = "default_site")]
    pub site: String,
    /// Suffix appended to paths built from model names (may be empty)
    #[serde(default = "default_format_extension")]
    pub format_extension: String,
    /// Per-request timeout used by the HTTP transport
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Default modes for `has_one` relationships declared without an override
    #[serde(default)]
    pub resolve_modes: ResolveModes,
}

fn default_true() -> bool {
    true
}

fn default_site() -> String {
    "http://localhost:3000".to_string()
}

fn default_format_extension() -> String {
    ".json".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for LifelineConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            format_extension: default_format_extension(),
            timeout_seconds: default_timeout_seconds(),
            resolve_modes: ResolveModes::default(),
        }
    }
}

impl LifelineConfig {
    /// Load the `[lifeline]` section of `config/config.toml`, overlaid by `LIFELINE__*` env vars.
    ///
    /// The file is optional. If it exists but cannot be read or parsed, a
    /// warning is logged and the configuration is rebuilt from the
    /// environment alone.
    pub fn load() -> Result<Self, ConfigError> {
        let file = File::with_name(DEFAULT_CONFIG_FILE).required(false);
        match Self::build(Some(file), environment()) {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    log::warn!(
                        "failed to load {}, falling back to environment: {}",
                        DEFAULT_CONFIG_FILE,
                        err
                    );
                }
                Self::build(None, environment()).map_err(|env_err| {
                    ConfigError::Message(format!(
                        "Failed to load configuration from file and env: {}, \
                         then env-only error: {}",
                        err, env_err
                    ))
                })
            }
        }
    }

    /// Load the `[lifeline]` section of an explicit file, overlaid by `LIFELINE__*` env vars.
    ///
    /// Unlike [`LifelineConfig::load`] the file is required and errors are
    /// returned as-is.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(File::from(path.as_ref()).required(true)), environment())
    }

    fn build(file: Option<ConfigFile>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let settings = builder.add_source(env).build()?;

        match settings.get::<LifelineConfig>(CONFIG_SECTION) {
            Ok(cfg) => Ok(cfg),
            // Neither the file nor the environment mention lifeline at all.
            Err(ConfigError::NotFound(_)) => Ok(LifelineConfig::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "lifeline configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }
}

/// `LIFELINE__SITE` maps to `lifeline.site`, the same key as `site` under `[lifeline]`
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .keep_prefix(true)
        .try_parsing(true)
}
