//! Calling-context recorder
//!
//! Multimap `(callee, callee-side abstraction) -> {(call site, caller context)}`
//! filled whenever an abstraction enters a callee. Pure bookkeeping for the
//! host engine's context-sensitive re-analysis; nothing here interprets it.

use crate::features::aliasing::domain::{MethodId, StmtId, TaintAbstraction};
use dashmap::DashMap;
use rustc_hash::FxHashSet;

/// `(call site, caller-side abstraction)`
pub type CallingContext = (StmtId, TaintAbstraction);

#[derive(Default)]
pub struct CallingContextRecorder {
    incoming: DashMap<(MethodId, TaintAbstraction), FxHashSet<CallingContext>>,
}

impl CallingContextRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `(call_site, caller_abs)` under `(callee, callee_abs)`
    pub fn record(
        &self,
        callee: MethodId,
        callee_abs: &TaintAbstraction,
        call_site: StmtId,
        caller_abs: &TaintAbstraction,
    ) {
        self.incoming
            .entry((callee, callee_abs.clone()))
            .or_insert_with(FxHashSet::default)
            .insert((call_site, caller_abs.clone()));
    }

    /// Contexts recorded for `(callee, callee_abs)`
    pub fn callers_of(&self, callee: MethodId, callee_abs: &TaintAbstraction) -> Vec<CallingContext> {
        self.incoming
            .get(&(callee, callee_abs.clone()))
            .map(|contexts| contexts.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of `(callee, abstraction)` keys
    pub fn len(&self) -> usize {
        self.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty()
    }

    pub fn clear(&self) {
        self.incoming.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::aliasing::domain::{EngineAccessPath, TaintSource, Variable};
    use std::sync::Arc;

    fn abs(var: u32) -> TaintAbstraction {
        TaintAbstraction::from_source(
            TaintSource::new(StmtId(0), "input"),
            EngineAccessPath::local(Variable(var)),
        )
    }

    #[test]
    fn test_record_and_lookup() {
        let recorder = CallingContextRecorder::new();
        recorder.record(MethodId(1), &abs(1), StmtId(10), &abs(5));
        recorder.record(MethodId(1), &abs(1), StmtId(20), &abs(6));

        let mut callers = recorder.callers_of(MethodId(1), &abs(1));
        callers.sort_by_key(|(site, _)| *site);

        assert_eq!(callers.len(), 2);
        assert_eq!(callers[0], (StmtId(10), abs(5)));
        assert_eq!(callers[1], (StmtId(20), abs(6)));
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_duplicate_context_recorded_once() {
        let recorder = CallingContextRecorder::new();
        recorder.record(MethodId(1), &abs(1), StmtId(10), &abs(5));
        recorder.record(MethodId(1), &abs(1), StmtId(10), &abs(5));
        assert_eq!(recorder.callers_of(MethodId(1), &abs(1)).len(), 1);
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let recorder = CallingContextRecorder::new();
        assert!(recorder.callers_of(MethodId(9), &abs(1)).is_empty());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_concurrent_record() {
        let recorder = Arc::new(CallingContextRecorder::new());
        std::thread::scope(|scope| {
            for worker in 0..4u32 {
                let recorder = Arc::clone(&recorder);
                scope.spawn(move || {
                    for site in 0..50u32 {
                        recorder.record(MethodId(1), &abs(1), StmtId(worker * 100 + site), &abs(2));
                    }
                });
            }
        });
        assert_eq!(recorder.callers_of(MethodId(1), &abs(1)).len(), 200);
    }
}
