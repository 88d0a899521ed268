//! Alias evaluation report
//!
//! Aggregates the numbers an evaluation run records per target program:
//! alias query time and propagation counts from the session, sparse-CFG
//! build time and cache behaviour from the oracle's build log.

use super::manager::SparseAliasManager;
use crate::features::aliasing::domain::SparsificationStrategy;
use crate::features::aliasing::ports::SparseCfgLogSource;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEvalReport {
    pub target_program: String,
    pub sparsification_strategy: SparsificationStrategy,
    pub total_alias_query_time_ms: u64,
    pub sparse_cfg_build_time_ms: u64,
    pub total_propagation_count: u64,
    /// Sparse-CFG cache hits (oracle side)
    pub cache_hit_count: u64,
    /// Sparse-CFG cache misses (oracle side)
    pub cache_miss_count: u64,
}

impl AliasEvalReport {
    /// Collect a report for `strategy`
    ///
    /// Session numbers are zero if the live session belongs to another
    /// strategy. The build log is only consulted for sparse strategies.
    pub fn collect(
        target_program: impl Into<String>,
        strategy: SparsificationStrategy,
        manager: &SparseAliasManager,
        logs: &dyn SparseCfgLogSource,
    ) -> Self {
        let counters = manager.counters_for(strategy).unwrap_or_default();

        let mut build_time_us = 0u64;
        let mut cache_hit_count = 0u64;
        let mut cache_miss_count = 0u64;
        if strategy.is_sparse() {
            for log in logs.query_logs(strategy) {
                build_time_us += log.duration_micros;
                if log.retrieved_from_cache {
                    cache_hit_count += 1;
                } else {
                    cache_miss_count += 1;
                }
            }
        }

        Self {
            target_program: target_program.into(),
            sparsification_strategy: strategy,
            total_alias_query_time_ms: counters.total_query_duration.as_millis() as u64,
            sparse_cfg_build_time_ms: build_time_us / 1000,
            total_propagation_count: counters.total_propagation_count(),
            cache_hit_count,
            cache_miss_count,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
