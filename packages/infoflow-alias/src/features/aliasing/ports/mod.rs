//! Ports (Interfaces) for alias resolution
//!
//! Everything this crate needs from the outside world goes through these
//! traits:
//! - **ProgramModel**: methods, statements and control-flow successors
//! - **SolverFactory / BackwardSolver**: the backward pointer-analysis oracle
//! - **SparseCfgLogSource**: the oracle's sparse-CFG build log (evaluation only)
//! - **ForwardSolver**: opaque handle to the host engine's solver
//!
//! and the host engine drives us through [`AliasingStrategy`].

use crate::errors::AliasResult;
use crate::features::aliasing::domain::{
    AliasQuery, MethodId, OracleAccessPath, SparsificationStrategy, StmtId, TaintAbstraction,
    Variable,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Program model
// ============================================================================

/// Read-only view of the program under analysis
pub trait ProgramModel: Send + Sync {
    /// Method containing `stmt`
    fn method_of(&self, stmt: StmtId) -> MethodId;

    /// Control-flow successors of `stmt` inside its method (possibly empty)
    fn successors_of(&self, stmt: StmtId) -> &[StmtId];

    /// Whether `stmt` contains an invoke expression
    fn is_call_statement(&self, stmt: StmtId) -> bool;

    /// Full signature, e.g. `<java.lang.Object: boolean equals(java.lang.Object)>`
    fn method_signature(&self, method: MethodId) -> &str;
}

// ============================================================================
// Pointer-analysis oracle
// ============================================================================

/// How the oracle treats static fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticFieldStrategy {
    FlowSensitive,
    FlowInsensitive,
    Ignore,
}

/// Fixed solver configuration applied to every oracle instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Per-query timeout in milliseconds (None = unbounded)
    pub analysis_timeout_ms: Option<u64>,

    pub static_field_strategy: StaticFieldStrategy,

    /// Reuse one solver for several queries
    pub allow_multiple_queries: bool,

    /// Track values through exceptional control flow
    pub throw_flows: bool,

    pub track_any_subclass_of_throwable: bool,

    /// Treat constructor/special invokes like ordinary propagation
    pub handle_special_invoke_as_normal_propagation: bool,

    /// Build the call graph on the fly instead of using the shared one
    pub on_the_fly_call_graph: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            analysis_timeout_ms: None,
            static_field_strategy: StaticFieldStrategy::FlowSensitive,
            allow_multiple_queries: true,
            throw_flows: true,
            track_any_subclass_of_throwable: true,
            handle_special_invoke_as_normal_propagation: true,
            on_the_fly_call_graph: false,
        }
    }
}

/// Answer to one backward query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackwardResults {
    /// Every access path that may alias the queried variable (itself included)
    pub aliases: FxHashSet<OracleAccessPath>,

    /// Forward propagations the solver performed
    pub forward_propagations: u64,

    /// Backward propagations the solver performed
    pub backward_propagations: u64,
}

impl BackwardResults {
    pub fn new(aliases: impl IntoIterator<Item = OracleAccessPath>) -> Self {
        Self {
            aliases: aliases.into_iter().collect(),
            forward_propagations: 0,
            backward_propagations: 0,
        }
    }

    pub fn with_propagations(mut self, forward: u64, backward: u64) -> Self {
        self.forward_propagations = forward;
        self.backward_propagations = backward;
        self
    }
}

/// Failure inside the oracle
#[derive(Debug, Clone, Error)]
#[error("Pointer analysis failed for {query}: {message}")]
pub struct OracleError {
    pub query: String,
    pub message: String,
}

impl OracleError {
    pub fn new(query: &AliasQuery, message: impl Into<String>) -> Self {
        Self {
            query: query.key(),
            message: message.into(),
        }
    }
}

/// One solver instance; answers backward alias queries
pub trait BackwardSolver {
    fn solve(&mut self, query: &AliasQuery) -> Result<BackwardResults, OracleError>;
}

/// Creates solvers bound to the shared call graph and data-flow scope
///
/// A fresh solver is created for every query; the sparse-CFG caches behind
/// it are keyed by strategy and are the oracle's business.
pub trait SolverFactory: Send + Sync {
    fn create_solver(
        &self,
        strategy: SparsificationStrategy,
        options: &SolverOptions,
    ) -> Box<dyn BackwardSolver + '_>;
}

/// Sparse-CFG construction record kept by the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseCfgQueryLog {
    /// Build (or lookup) time in microseconds
    pub duration_micros: u64,

    /// Whether the sparse CFG came from the oracle's cache
    pub retrieved_from_cache: bool,
}

/// Read access to the oracle's sparse-CFG build log
pub trait SparseCfgLogSource {
    fn query_logs(&self, strategy: SparsificationStrategy) -> Vec<SparseCfgQueryLog>;
}

// ============================================================================
// Host engine
// ============================================================================

/// Opaque handle to the host's forward solver
pub trait ForwardSolver: Send + Sync {
    fn name(&self) -> &str;
}

/// Alias strategy as the forward taint engine sees it
pub trait AliasingStrategy: Send + Sync {
    /// Add taints for the aliases of `new_abs` at `src` to `taint_set`
    fn compute_alias_taints(
        &self,
        d1: &TaintAbstraction,
        src: StmtId,
        target_value: Option<Variable>,
        taint_set: &mut FxHashSet<TaintAbstraction>,
        method: MethodId,
        new_abs: &TaintAbstraction,
    ) -> AliasResult<()>;

    /// Called whenever an abstraction enters a callee
    fn inject_calling_context(
        &self,
        abs: &TaintAbstraction,
        solver: Option<&dyn ForwardSolver>,
        callee: MethodId,
        call_site: StmtId,
        source: &TaintAbstraction,
        d1: &TaintAbstraction,
    );

    fn is_flow_sensitive(&self) -> bool;

    fn requires_analysis_on_return(&self) -> bool;

    /// Dedicated alias solver, if the strategy runs one inside the host
    fn solver(&self) -> Option<&dyn ForwardSolver> {
        None
    }

    fn cleanup(&self) {}
}
