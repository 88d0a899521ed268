//! Alias query
//!
//! A backward query asks the oracle for every access path that may alias
//! `variable` on the control-flow edge `stmt -> successor`.

use super::program::{MethodId, StmtId, Variable};
use std::fmt;

/// Control-flow edge inside one method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlFlowEdge {
    pub method: MethodId,
    pub stmt: StmtId,
    pub successor: StmtId,
}

/// Backward alias query
///
/// The successor is not optional: a statement without an outgoing edge
/// cannot be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AliasQuery {
    edge: ControlFlowEdge,
    variable: Variable,
}

impl AliasQuery {
    pub fn new(edge: ControlFlowEdge, variable: Variable) -> Self {
        Self { edge, variable }
    }

    pub fn edge(&self) -> ControlFlowEdge {
        self.edge
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// Stable key used for per-query invocation counting
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AliasQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BackwardQuery({} @ {}:{} -> {})",
            self.variable, self.edge.method, self.edge.stmt, self.edge.successor
        )
    }
}
