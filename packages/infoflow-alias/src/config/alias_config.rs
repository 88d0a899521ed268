//! Alias resolution configuration
//!
//! Built from a [`Preset`] and adjusted with builder methods, or loaded from
//! YAML. `return_sites` has no default on purpose: a YAML file must say
//! whether call/return statements are queried. Oracle solver options are
//! not part of the configuration; every solver gets `SolverOptions::default()`.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use crate::features::aliasing::domain::{ReturnSiteMode, SparsificationStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Signatures ignored by the alias-aware deployment
pub const DEFAULT_IGNORED_METHODS: [&str; 2] = ["int hashCode()", "boolean equals(java.lang.Object)"];

const MAX_ACCESS_PATH_LENGTH: usize = 64;

/// Alias resolution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    /// Sparsification strategy handed to the oracle
    #[serde(default)]
    pub strategy: SparsificationStrategy,

    /// Whether call/return statements trigger queries
    pub return_sites: ReturnSiteMode,

    /// Answer every query with the empty set
    #[serde(default)]
    pub disable_aliasing: bool,

    /// Memoize oracle answers per query
    #[serde(default)]
    pub query_cache: bool,

    /// Query cache capacity (None = unbounded)
    #[serde(default)]
    pub query_cache_capacity: Option<usize>,

    /// Method signature fragments whose statements are never queried
    #[serde(default = "default_ignored_methods")]
    pub ignored_methods: Vec<String>,

    /// Engine access-path k-limit (1..=64)
    #[serde(default = "default_access_path_length")]
    pub access_path_length: usize,
}

fn default_ignored_methods() -> Vec<String> {
    DEFAULT_IGNORED_METHODS.iter().map(|s| s.to_string()).collect()
}

fn default_access_path_length() -> usize {
    5
}

impl AliasConfig {
    /// Full configuration for a preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Baseline => Self {
                strategy: SparsificationStrategy::None,
                return_sites: ReturnSiteMode::FieldWriteOnly,
                disable_aliasing: false,
                query_cache: false,
                query_cache_capacity: None,
                ignored_methods: Vec::new(),
                access_path_length: default_access_path_length(),
            },
            Preset::AliasAware => Self {
                strategy: SparsificationStrategy::AliasAware,
                return_sites: ReturnSiteMode::FieldWriteAndReturn,
                disable_aliasing: false,
                query_cache: false,
                query_cache_capacity: None,
                ignored_methods: default_ignored_methods(),
                access_path_length: default_access_path_length(),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.access_path_length == 0 || self.access_path_length > MAX_ACCESS_PATH_LENGTH {
            return Err(ConfigError::range_with_hint(
                "access_path_length",
                self.access_path_length,
                1,
                MAX_ACCESS_PATH_LENGTH,
                "Access paths need at least one field slot",
            ));
        }

        if let Some(capacity) = self.query_cache_capacity {
            if capacity == 0 {
                return Err(ConfigError::range_with_hint(
                    "query_cache_capacity",
                    capacity,
                    1,
                    usize::MAX,
                    "Omit the field for an unbounded cache",
                ));
            }
            if !self.query_cache {
                return Err(ConfigError::Validation(
                    "query_cache_capacity is set but query_cache is disabled".to_string(),
                ));
            }
        }

        if self.ignored_methods.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "ignored_methods must not contain empty signatures".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Builder: Set strategy
    pub fn strategy(mut self, v: SparsificationStrategy) -> Self {
        self.strategy = v;
        self
    }

    /// Builder: Set return_sites
    pub fn return_sites(mut self, v: ReturnSiteMode) -> Self {
        self.return_sites = v;
        self
    }

    /// Builder: Set disable_aliasing
    pub fn disable_aliasing(mut self, v: bool) -> Self {
        self.disable_aliasing = v;
        self
    }

    /// Builder: Set query_cache
    pub fn query_cache(mut self, v: bool) -> Self {
        self.query_cache = v;
        self
    }

    /// Builder: Set query_cache_capacity
    pub fn query_cache_capacity(mut self, v: Option<usize>) -> Self {
        self.query_cache_capacity = v;
        self
    }

    /// Builder: Set ignored_methods
    pub fn ignored_methods(mut self, v: Vec<String>) -> Self {
        self.ignored_methods = v;
        self
    }

    /// Builder: Set access_path_length
    pub fn access_path_length(mut self, v: usize) -> Self {
        self.access_path_length = v;
        self
    }
}
