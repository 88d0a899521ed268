//! Preset configurations
//!
//! One preset per deployed alias strategy.

use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Non-sparse oracle, field writes only, no ignored methods
    Baseline,

    /// Alias-aware sparsification, field writes and return sites,
    /// `hashCode()`/`equals(Object)` ignored
    AliasAware,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "alias_aware" | "alias-aware" => Ok(Self::AliasAware),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::AliasAware => "alias_aware",
        }
    }
}
