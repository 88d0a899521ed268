/*
 * Alias Session
 *
 * One oracle configuration (sparsification strategy, fixed solver options)
 * with its query cache and instrumentation. A session is never shared between
 * strategies: switching strategy means building a new session, see
 * SparseAliasManager.
 *
 * Query path (get_aliases):
 * 1. disabled -> empty set, nothing recorded
 * 2. start timer, build the query (fails without a CFG successor)
 * 3. cache lookup / fresh oracle solve
 * 4. add elapsed time, count the query key
 */

use super::query_builder::AliasQueryBuilder;
use super::query_cache::{AliasSet, QueryCache};
use crate::config::AliasConfig;
use crate::errors::AliasResult;
use crate::features::aliasing::domain::{
    AliasQuery, MethodId, OracleAccessPath, SparsificationStrategy, StmtId, Variable,
};
use crate::features::aliasing::ports::{ProgramModel, SolverFactory, SolverOptions};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Session instrumentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionCounters {
    /// Wall time spent in `get_aliases` (cache lookups included)
    pub total_query_duration: Duration,

    /// Number of distinct query keys seen
    pub distinct_query_count: usize,

    /// Number of `get_aliases` calls that produced a result
    pub total_query_invocation_count: u64,

    /// Number of fresh oracle solves
    pub oracle_invocation_count: u64,

    pub cache_hit_count: u64,

    pub cache_miss_count: u64,

    /// Forward propagations reported by the oracle
    pub forward_propagation_count: u64,

    /// Backward propagations reported by the oracle
    pub backward_propagation_count: u64,
}

impl SessionCounters {
    pub fn total_propagation_count(&self) -> u64 {
        self.forward_propagation_count + self.backward_propagation_count
    }

    /// Calculate hit rate (0.0-1.0)
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hit_count + self.cache_miss_count;
        if total == 0 {
            0.0
        } else {
            self.cache_hit_count as f64 / total as f64
        }
    }
}

/// Oracle binding, cache and counters for one sparsification strategy
pub struct AliasSession {
    strategy: SparsificationStrategy,
    solver_options: SolverOptions,
    disable_aliasing: bool,
    cache: Option<QueryCache>,
    query_counts: FxHashMap<String, u64>,
    counters: SessionCounters,
}

impl AliasSession {
    /// Fresh session: zero counters, empty cache
    pub fn new(strategy: SparsificationStrategy, config: &AliasConfig) -> Self {
        let cache = if config.query_cache {
            Some(QueryCache::new(
                config.query_cache_capacity.and_then(NonZeroUsize::new),
            ))
        } else {
            None
        };

        Self {
            strategy,
            solver_options: SolverOptions::default(),
            disable_aliasing: config.disable_aliasing,
            cache,
            query_counts: FxHashMap::default(),
            counters: SessionCounters::default(),
        }
    }

    pub fn strategy(&self) -> SparsificationStrategy {
        self.strategy
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// How often the query with `key` was issued
    pub fn query_count(&self, key: &str) -> u64 {
        self.query_counts.get(key).copied().unwrap_or(0)
    }

    /// Aliases of `variable` right after `stmt` in `method`
    ///
    /// The result includes `variable` itself if the oracle reports it;
    /// filtering is the caller's job.
    pub fn get_aliases(
        &mut self,
        program: &dyn ProgramModel,
        solvers: &dyn SolverFactory,
        stmt: StmtId,
        method: MethodId,
        variable: Variable,
    ) -> AliasResult<AliasSet> {
        if self.disable_aliasing {
            return Ok(AliasSet::default());
        }

        let start = Instant::now();
        let query = AliasQueryBuilder::new(program).build(stmt, method, variable)?;

        let cached = self.cache.as_mut().and_then(|cache| cache.get(&query));
        let hit = cached.is_some();
        let aliases = match cached {
            Some(aliases) => {
                self.counters.cache_hit_count += 1;
                aliases
            }
            None => {
                let aliases = Arc::new(self.solve(solvers, &query)?);
                if let Some(cache) = self.cache.as_mut() {
                    self.counters.cache_miss_count += 1;
                    cache.insert(query, Arc::clone(&aliases));
                }
                aliases
            }
        };

        let elapsed = start.elapsed();
        self.counters.total_query_duration += elapsed;
        self.count_query(&query);

        debug!(
            strategy = %self.strategy,
            query = %query,
            cache_hit = hit,
            aliases = aliases.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "alias query"
        );

        Ok(aliases)
    }

    /// One fresh solver per query, bound to this session's strategy
    fn solve(
        &mut self,
        solvers: &dyn SolverFactory,
        query: &AliasQuery,
    ) -> AliasResult<FxHashSet<OracleAccessPath>> {
        let mut solver = solvers.create_solver(self.strategy, &self.solver_options);
        let results = solver.solve(query)?;

        self.counters.oracle_invocation_count += 1;
        self.counters.forward_propagation_count += results.forward_propagations;
        self.counters.backward_propagation_count += results.backward_propagations;

        Ok(results.aliases)
    }

    fn count_query(&mut self, query: &AliasQuery) {
        *self.query_counts.entry(query.key()).or_insert(0) += 1;
        self.counters.distinct_query_count = self.query_counts.len();
        self.counters.total_query_invocation_count += 1;
    }
}
