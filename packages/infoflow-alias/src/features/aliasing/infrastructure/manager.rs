/*
 * Sparse Alias Manager
 *
 * Owns the single live AliasSession and the lock that serializes every
 * oracle query. The oracle mutates shared sparse-CFG caches while solving,
 * so at most one query runs at a time across all taint workers.
 *
 * Invariants:
 * - at most one session exists; asking for another strategy replaces it
 *   (cache and counters included)
 * - session replacement, queries and counter updates all happen under the
 *   same lock
 */

use super::query_cache::AliasSet;
use super::session::{AliasSession, SessionCounters};
use crate::config::AliasConfig;
use crate::errors::AliasResult;
use crate::features::aliasing::domain::{MethodId, SparsificationStrategy, StmtId, Variable};
use crate::features::aliasing::ports::{ProgramModel, SolverFactory};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct SparseAliasManager {
    program: Arc<dyn ProgramModel>,
    solvers: Arc<dyn SolverFactory>,
    config: AliasConfig,
    session: Mutex<Option<AliasSession>>,
}

impl SparseAliasManager {
    /// Create a manager; no session exists until the first query
    pub fn new(
        program: Arc<dyn ProgramModel>,
        solvers: Arc<dyn SolverFactory>,
        config: AliasConfig,
    ) -> AliasResult<Self> {
        config.validate()?;
        info!(
            strategy = %config.strategy,
            query_cache = config.query_cache,
            disable_aliasing = config.disable_aliasing,
            "sparse_alias_manager_initialized"
        );
        Ok(Self {
            program,
            solvers,
            config,
            session: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &AliasConfig {
        &self.config
    }

    pub fn program(&self) -> &dyn ProgramModel {
        self.program.as_ref()
    }

    /// Run `f` on the session for `strategy` while holding the query lock
    ///
    /// Creates the session if none exists, replaces it if it belongs to
    /// another strategy.
    pub fn with_session<R>(
        &self,
        strategy: SparsificationStrategy,
        f: impl FnOnce(&mut AliasSession, &dyn ProgramModel, &dyn SolverFactory) -> R,
    ) -> R {
        let mut slot = self.session.lock();
        let session = Self::get_or_create(&mut slot, strategy, &self.config);
        f(session, self.program.as_ref(), self.solvers.as_ref())
    }

    /// Aliases of `variable` after `stmt`, answered by the `strategy` session
    pub fn get_aliases(
        &self,
        strategy: SparsificationStrategy,
        stmt: StmtId,
        method: MethodId,
        variable: Variable,
    ) -> AliasResult<AliasSet> {
        self.with_session(strategy, |session, program, solvers| {
            session.get_aliases(program, solvers, stmt, method, variable)
        })
    }

    /// Strategy of the live session
    pub fn active_strategy(&self) -> Option<SparsificationStrategy> {
        self.session.lock().as_ref().map(AliasSession::strategy)
    }

    /// Counter snapshot of the live session
    pub fn counters(&self) -> Option<SessionCounters> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.counters().clone())
    }

    /// Counter snapshot if the live session belongs to `strategy`
    pub fn counters_for(&self, strategy: SparsificationStrategy) -> Option<SessionCounters> {
        self.session
            .lock()
            .as_ref()
            .filter(|session| session.strategy() == strategy)
            .map(|session| session.counters().clone())
    }

    /// Total query time of the live session
    pub fn total_duration(&self) -> Duration {
        self.counters()
            .map(|c| c.total_query_duration)
            .unwrap_or_default()
    }

    /// Drop the live session
    pub fn reset(&self) {
        self.session.lock().take();
    }

    fn get_or_create<'s>(
        slot: &'s mut Option<AliasSession>,
        strategy: SparsificationStrategy,
        config: &AliasConfig,
    ) -> &'s mut AliasSession {
        if let Some(current) = slot.as_ref() {
            if current.strategy() != strategy {
                let counters = current.counters();
                if counters.total_query_invocation_count > 0 {
                    warn!(
                        from = %current.strategy(),
                        to = %strategy,
                        discarded_queries = counters.total_query_invocation_count,
                        "alias session replaced; cache and counters discarded"
                    );
                }
                *slot = None;
            }
        }

        slot.get_or_insert_with(|| {
            info!(strategy = %strategy, "alias session created");
            AliasSession::new(strategy, config)
        })
    }
}
