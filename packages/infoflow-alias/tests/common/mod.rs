//! Shared fixtures: in-memory program model and scripted oracle

#![allow(dead_code)]

use infoflow_alias::{
    AliasConfig, BackwardResults, BackwardSolver, EngineAccessPath, FieldId, MethodId,
    OracleAccessPath, OracleError, ProgramModel, SolverFactory, SolverOptions,
    SparseAliasManager, SparsificationStrategy, StmtId, TaintAbstraction, TaintSource, Variable,
};
use infoflow_alias::AliasQuery;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Program model
// ============================================================================

#[derive(Default)]
pub struct InMemoryProgram {
    signatures: FxHashMap<MethodId, String>,
    stmt_methods: FxHashMap<StmtId, MethodId>,
    successors: FxHashMap<StmtId, Vec<StmtId>>,
    calls: FxHashSet<StmtId>,
}

impl InMemoryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: u32, signature: &str) -> Self {
        self.signatures.insert(MethodId(method), signature.to_string());
        self
    }

    /// Non-call statement
    pub fn stmt(mut self, stmt: u32, method: u32, succs: &[u32]) -> Self {
        self.stmt_methods.insert(StmtId(stmt), MethodId(method));
        self.successors
            .insert(StmtId(stmt), succs.iter().map(|s| StmtId(*s)).collect());
        self
    }

    /// Call statement
    pub fn call(self, stmt: u32, method: u32, succs: &[u32]) -> Self {
        let mut program = self.stmt(stmt, method, succs);
        program.calls.insert(StmtId(stmt));
        program
    }
}

impl ProgramModel for InMemoryProgram {
    fn method_of(&self, stmt: StmtId) -> MethodId {
        self.stmt_methods[&stmt]
    }

    fn successors_of(&self, stmt: StmtId) -> &[StmtId] {
        self.successors
            .get(&stmt)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn is_call_statement(&self, stmt: StmtId) -> bool {
        self.calls.contains(&stmt)
    }

    fn method_signature(&self, method: MethodId) -> &str {
        self.signatures
            .get(&method)
            .map(String::as_str)
            .unwrap_or("")
    }
}

// ============================================================================
// Oracle
// ============================================================================

#[derive(Default)]
pub struct ScriptedSolverFactory {
    answers: FxHashMap<(StmtId, Variable), BackwardResults>,
    failing: FxHashSet<(StmtId, Variable)>,
    delay: Option<Duration>,
    invocations: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    strategies: Mutex<Vec<SparsificationStrategy>>,
    options: Mutex<Vec<SolverOptions>>,
}

impl ScriptedSolverFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `var` at `stmt` with `aliases`
    pub fn answer(self, stmt: u32, var: u32, aliases: Vec<OracleAccessPath>) -> Self {
        self.answer_results(stmt, var, BackwardResults::new(aliases))
    }

    pub fn answer_results(mut self, stmt: u32, var: u32, results: BackwardResults) -> Self {
        self.answers.insert((StmtId(stmt), Variable(var)), results);
        self
    }

    pub fn fail(mut self, stmt: u32, var: u32) -> Self {
        self.failing.insert((StmtId(stmt), Variable(var)));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of solves performed
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Highest number of solves observed running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Strategy of every solver created, in order
    pub fn strategies(&self) -> Vec<SparsificationStrategy> {
        self.strategies.lock().clone()
    }

    /// Options of every solver created, in order
    pub fn options(&self) -> Vec<SolverOptions> {
        self.options.lock().clone()
    }
}

struct ScriptedSolver<'a> {
    factory: &'a ScriptedSolverFactory,
}

impl BackwardSolver for ScriptedSolver<'_> {
    fn solve(&mut self, query: &AliasQuery) -> Result<BackwardResults, OracleError> {
        let factory = self.factory;
        let running = factory.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        factory.max_in_flight.fetch_max(running, Ordering::SeqCst);
        factory.invocations.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = factory.delay {
            std::thread::sleep(delay);
        }

        let key = (query.edge().stmt, query.variable());
        let result = if factory.failing.contains(&key) {
            Err(OracleError::new(query, "solver crashed"))
        } else {
            Ok(factory.answers.get(&key).cloned().unwrap_or_default())
        };

        factory.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl SolverFactory for ScriptedSolverFactory {
    fn create_solver(
        &self,
        strategy: SparsificationStrategy,
        options: &SolverOptions,
    ) -> Box<dyn BackwardSolver + '_> {
        self.strategies.lock().push(strategy);
        self.options.lock().push(options.clone());
        Box::new(ScriptedSolver { factory: self })
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn manager(
    program: InMemoryProgram,
    solvers: &Arc<ScriptedSolverFactory>,
    config: AliasConfig,
) -> Arc<SparseAliasManager> {
    let solvers: Arc<dyn SolverFactory> = solvers.clone();
    Arc::new(SparseAliasManager::new(Arc::new(program), solvers, config).unwrap())
}

pub fn fields(ids: &[u32]) -> Vec<FieldId> {
    ids.iter().map(|f| FieldId(*f)).collect()
}

/// Oracle path `var.f1...fn`
pub fn oracle(var: u32, field_ids: &[u32]) -> OracleAccessPath {
    OracleAccessPath::local_with_fields(Variable(var), &fields(field_ids))
}

/// Tainted abstraction for `var.f1...fn`, sourced at statement 0
pub fn tainted(var: u32, field_ids: &[u32]) -> TaintAbstraction {
    TaintAbstraction::from_source(
        TaintSource::new(StmtId(0), "user_input"),
        EngineAccessPath::with_fields(Variable(var), fields(field_ids)),
    )
}

/// Sorted display form of every access path in `set`
pub fn paths(set: &FxHashSet<TaintAbstraction>) -> Vec<String> {
    let mut paths: Vec<String> = set
        .iter()
        .map(|abs| abs.access_path().to_string())
        .collect();
    paths.sort();
    paths
}
