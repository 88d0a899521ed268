//! Error types for infoflow-alias
//!
//! Fatal errors abort the alias query that raised them and are handed back
//! to the host engine. Translation failures are not errors at this level;
//! see [`TranslationError`](crate::features::aliasing::infrastructure::TranslationError).

use crate::config::ConfigError;
use crate::features::aliasing::domain::{MethodId, StmtId};
use crate::features::aliasing::ports::OracleError;
use thiserror::Error;

/// Main error type for alias resolution
#[derive(Debug, Error)]
pub enum AliasError {
    /// The query point has no control-flow successor
    #[error("No successors for statement {statement} in method {method}; cannot build alias query")]
    QueryConstruction { statement: StmtId, method: MethodId },

    /// The pointer-analysis oracle failed
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AliasError {
    /// Create a query construction error
    pub fn query_construction(statement: StmtId, method: MethodId) -> Self {
        Self::QueryConstruction { statement, method }
    }
}

/// Result type alias for alias operations
pub type AliasResult<T> = std::result::Result<T, AliasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_construction_message() {
        let err = AliasError::query_construction(StmtId(7), MethodId(2));
        let msg = err.to_string();
        assert!(msg.contains("s7"));
        assert!(msg.contains("m2"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AliasError = ConfigError::Validation("bad".to_string()).into();
        assert!(matches!(err, AliasError::Config(_)));
    }
}
