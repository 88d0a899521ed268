//! # Alias Resolution for Forward Taint Analysis
//!
//! Decides when a freshly tainted access path may have aliases that must be
//! tainted as well, asks a backward pointer-analysis oracle for them, and
//! maps the answer back into the taint engine's access-path model.
//!
//! ## Layers
//! - **domain**: handles, access paths, taint abstractions, queries
//! - **ports**: program model, oracle and host-engine interfaces
//! - **infrastructure**: bridge, query builder, session/manager, recorder
//! - **application**: [`AliasSiteStrategy`], the entry point for the host
//!
//! ## Usage
//! ```text
//! let manager = Arc::new(SparseAliasManager::new(program, solvers, config)?);
//! let strategy = AliasSiteStrategy::new(Arc::clone(&manager));
//!
//! // inside the forward engine
//! strategy.compute_alias_taints(&d1, stmt, target, &mut out, method, &new_abs)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::AliasSiteStrategy;
pub use domain::{
    AliasQuery, ControlFlowEdge, EngineAccessPath, FieldId, MethodId, OracleAccessPath,
    OracleField, OracleValue, ReturnSiteMode, SparsificationStrategy, StmtId, TaintAbstraction,
    TaintSource, Variable,
};
pub use infrastructure::{
    AccessPathBridge, AliasEvalReport, AliasSession, CallingContextRecorder, SessionCounters,
    SparseAliasManager, TranslationError,
};
pub use ports::{
    AliasingStrategy, BackwardResults, BackwardSolver, ForwardSolver, OracleError, ProgramModel,
    SolverFactory, SolverOptions, SparseCfgLogSource, SparseCfgQueryLog, StaticFieldStrategy,
};
