//! Taint abstraction
//!
//! The fact the forward engine propagates: an access path plus the taint
//! source it originated from. Abstractions are immutable and cheap to clone;
//! deriving a new one links it to its predecessor so the host can rebuild
//! the propagation path.

use super::access_path::EngineAccessPath;
use super::program::StmtId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Where a taint was introduced
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaintSource {
    /// Source statement
    pub stmt: StmtId,

    /// Source category (e.g. "user_input")
    pub label: Arc<str>,
}

impl TaintSource {
    pub fn new(stmt: StmtId, label: impl Into<Arc<str>>) -> Self {
        Self {
            stmt,
            label: label.into(),
        }
    }
}

#[derive(Debug)]
struct AbstractionData {
    access_path: EngineAccessPath,
    source: Option<TaintSource>,
    current_stmt: Option<StmtId>,
    predecessor: Option<TaintAbstraction>,
}

/// Taint abstraction
///
/// Equality and hashing consider the access path and the source only, so
/// the same fact reached along different paths collapses in a taint set.
#[derive(Debug, Clone)]
pub struct TaintAbstraction(Arc<AbstractionData>);

impl TaintAbstraction {
    /// The zero fact (no access path, no source)
    pub fn zero() -> Self {
        Self(Arc::new(AbstractionData {
            access_path: EngineAccessPath::empty(),
            source: None,
            current_stmt: None,
            predecessor: None,
        }))
    }

    /// Fresh abstraction at a taint source
    pub fn from_source(source: TaintSource, access_path: EngineAccessPath) -> Self {
        let stmt = source.stmt;
        Self(Arc::new(AbstractionData {
            access_path,
            source: Some(source),
            current_stmt: Some(stmt),
            predecessor: None,
        }))
    }

    /// Derive an abstraction for `access_path` at `stmt`, keeping this
    /// abstraction's source and linking back to it
    pub fn derive_new_abstraction(&self, access_path: EngineAccessPath, stmt: StmtId) -> Self {
        Self(Arc::new(AbstractionData {
            access_path,
            source: self.0.source.clone(),
            current_stmt: Some(stmt),
            predecessor: Some(self.clone()),
        }))
    }

    pub fn access_path(&self) -> &EngineAccessPath {
        &self.0.access_path
    }

    pub fn source(&self) -> Option<&TaintSource> {
        self.0.source.as_ref()
    }

    pub fn current_stmt(&self) -> Option<StmtId> {
        self.0.current_stmt
    }

    pub fn predecessor(&self) -> Option<&TaintAbstraction> {
        self.0.predecessor.as_ref()
    }

    pub fn is_zero(&self) -> bool {
        self.0.source.is_none() && self.0.access_path.is_empty()
    }
}

impl PartialEq for TaintAbstraction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.access_path == other.0.access_path && self.0.source == other.0.source)
    }
}

impl Eq for TaintAbstraction {}

impl Hash for TaintAbstraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.access_path.hash(state);
        self.0.source.hash(state);
    }
}

impl fmt::Display for TaintAbstraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "<zero>");
        }
        write!(f, "{}", self.0.access_path)?;
        if let Some(source) = &self.0.source {
            write!(f, " <- {}@{}", source.label, source.stmt)?;
        }
        Ok(())
    }
}
