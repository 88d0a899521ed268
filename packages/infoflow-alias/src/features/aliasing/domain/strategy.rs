//! Strategy selectors
//!
//! `SparsificationStrategy` is handed to the oracle and only changes its
//! cost. `ReturnSiteMode` decides whether call/return statements trigger
//! alias queries at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the oracle prunes the control-flow graph it walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparsificationStrategy {
    /// Full control-flow graph (baseline)
    #[default]
    None,

    /// Keep statements relevant to the queried type
    TypeBased,

    /// Keep statements that can create or kill aliases of the queried value
    AliasAware,
}

impl SparsificationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TypeBased => "type_based",
            Self::AliasAware => "alias_aware",
        }
    }

    /// Whether the oracle builds sparse graphs (and a build log) at all
    pub fn is_sparse(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for SparsificationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which statement kinds trigger alias queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnSiteMode {
    /// Only field writes are queried; call statements are skipped
    FieldWriteOnly,

    /// Field writes and call/return statements are queried
    FieldWriteAndReturn,
}

impl ReturnSiteMode {
    pub fn handles_return_sites(&self) -> bool {
        matches!(self, Self::FieldWriteAndReturn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!(SparsificationStrategy::AliasAware.to_string(), "alias_aware");
        assert!(!SparsificationStrategy::None.is_sparse());
        assert!(SparsificationStrategy::TypeBased.is_sparse());
    }

    #[test]
    fn test_return_site_mode() {
        assert!(ReturnSiteMode::FieldWriteAndReturn.handles_return_sites());
        assert!(!ReturnSiteMode::FieldWriteOnly.handles_return_sites());
    }
}
