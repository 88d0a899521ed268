//! Configuration system
//!
//! ```rust,ignore
//! use infoflow_alias::config::{AliasConfig, Preset};
//!
//! // Preset
//! let config = AliasConfig::from_preset(Preset::AliasAware);
//!
//! // Preset with overrides
//! let config = AliasConfig::from_preset(Preset::Baseline).query_cache(true);
//!
//! // YAML
//! let config = AliasConfig::from_yaml("alias.yaml")?;
//! ```

pub mod alias_config;
pub mod error;
pub mod preset;

pub use alias_config::{AliasConfig, DEFAULT_IGNORED_METHODS};
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
