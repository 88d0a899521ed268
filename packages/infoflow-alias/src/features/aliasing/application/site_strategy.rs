/*
 * Alias Site Strategy
 *
 * Called by the forward taint engine for every newly derived abstraction.
 * New aliases can only appear at two kinds of program points:
 *
 * - Field write (any non-call statement): `b.f = tainted`. Query the
 *   aliases of `b` and taint `a.f` for every alias `a`.
 * - Return site (call statement): the last field belongs to the caller's
 *   view. Query without it, then re-append it to every alias.
 *
 * Whether return sites are handled is a configuration switch
 * (ReturnSiteMode); with FieldWriteOnly, call statements issue no query.
 *
 * The oracle query and the translation of its answer run under the alias
 * manager's lock.
 */

use crate::config::{AliasConfig, Preset};
use crate::errors::AliasResult;
use crate::features::aliasing::domain::{
    FieldId, MethodId, ReturnSiteMode, SparsificationStrategy, StmtId, TaintAbstraction, Variable,
};
use crate::features::aliasing::infrastructure::{
    AccessPathBridge, CallingContextRecorder, SparseAliasManager,
};
use crate::features::aliasing::ports::{AliasingStrategy, ForwardSolver};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::trace;

pub struct AliasSiteStrategy {
    manager: Arc<SparseAliasManager>,
    strategy: SparsificationStrategy,
    return_sites: ReturnSiteMode,
    ignored_methods: Vec<String>,
    bridge: AccessPathBridge,
    incoming: CallingContextRecorder,
}

impl AliasSiteStrategy {
    /// Strategy configured from the manager's [`AliasConfig`]
    pub fn new(manager: Arc<SparseAliasManager>) -> Self {
        let config = manager.config().clone();
        Self::from_config(manager, &config)
    }

    /// Non-sparse oracle, field writes only, nothing ignored
    pub fn baseline(manager: Arc<SparseAliasManager>) -> Self {
        let config = AliasConfig::from_preset(Preset::Baseline)
            .access_path_length(manager.config().access_path_length);
        Self::from_config(manager, &config)
    }

    /// Alias-aware sparse oracle, field writes and return sites
    pub fn alias_aware(manager: Arc<SparseAliasManager>) -> Self {
        let config = AliasConfig::from_preset(Preset::AliasAware)
            .access_path_length(manager.config().access_path_length);
        Self::from_config(manager, &config)
    }

    fn from_config(manager: Arc<SparseAliasManager>, config: &AliasConfig) -> Self {
        Self {
            manager,
            strategy: config.strategy,
            return_sites: config.return_sites,
            ignored_methods: config.ignored_methods.clone(),
            bridge: AccessPathBridge::new(config.access_path_length),
            incoming: CallingContextRecorder::new(),
        }
    }

    /// Builder: Set sparsification strategy
    pub fn with_strategy(mut self, strategy: SparsificationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder: Set return-site handling
    pub fn with_return_sites(mut self, mode: ReturnSiteMode) -> Self {
        self.return_sites = mode;
        self
    }

    /// Builder: Set ignored method signature fragments
    ///
    /// Blank fragments are dropped; they would match every signature.
    pub fn with_ignored_methods(mut self, methods: Vec<String>) -> Self {
        self.ignored_methods = methods
            .into_iter()
            .filter(|m| !m.trim().is_empty())
            .collect();
        self
    }

    pub fn strategy(&self) -> SparsificationStrategy {
        self.strategy
    }

    pub fn return_sites(&self) -> ReturnSiteMode {
        self.return_sites
    }

    pub fn manager(&self) -> &Arc<SparseAliasManager> {
        &self.manager
    }

    pub fn calling_contexts(&self) -> &CallingContextRecorder {
        &self.incoming
    }

    fn is_ignored_method(&self, method: MethodId) -> bool {
        let signature = self.manager.program().method_signature(method);
        self.ignored_methods
            .iter()
            .any(|ignored| signature.contains(ignored.as_str()))
    }

    fn handle_field_write(
        &self,
        src: StmtId,
        method: MethodId,
        base: Variable,
        taint_set: &mut FxHashSet<TaintAbstraction>,
        new_abs: &TaintAbstraction,
    ) -> AliasResult<()> {
        let fields = new_abs.access_path().fields();
        self.propagate_aliases(src, method, base, fields, None, taint_set, new_abs)
    }

    fn handle_return(
        &self,
        d1: &TaintAbstraction,
        src: StmtId,
        method: MethodId,
        base: Variable,
        taint_set: &mut FxHashSet<TaintAbstraction>,
        new_abs: &TaintAbstraction,
    ) -> AliasResult<()> {
        let Some((last, prefix)) = new_abs.access_path().fields().split_last() else {
            trace!(stmt = %src, abs = %new_abs, "return site without trailing field");
            return Ok(());
        };
        if d1 == new_abs {
            return Ok(());
        }
        self.propagate_aliases(src, method, base, prefix, Some(*last), taint_set, new_abs)
    }

    /// Query aliases of `base`, extend each by `prefix` (then `last`), and
    /// add the translated abstractions to `taint_set`
    fn propagate_aliases(
        &self,
        src: StmtId,
        method: MethodId,
        base: Variable,
        prefix: &[FieldId],
        last: Option<FieldId>,
        taint_set: &mut FxHashSet<TaintAbstraction>,
        new_abs: &TaintAbstraction,
    ) -> AliasResult<()> {
        let bridge = self.bridge;
        self.manager
            .with_session(self.strategy, |session, program, solvers| -> AliasResult<()> {
                let aliases = session.get_aliases(program, solvers, src, method, base)?;
                let aliases = AccessPathBridge::filter_self_alias(base, aliases.iter());

                for alias in &aliases {
                    let mut extended = AccessPathBridge::append_fields(alias, prefix);
                    if let Some(last) = last {
                        extended = AccessPathBridge::append_fields(&extended, &[last]);
                    }
                    match bridge.to_engine_abstraction(&extended, src, new_abs) {
                        Ok(abs) => {
                            taint_set.insert(abs);
                        }
                        Err(err) => {
                            trace!(stmt = %src, alias = %extended, error = %err, "alias dropped");
                        }
                    }
                }
                Ok(())
            })
    }
}

impl AliasingStrategy for AliasSiteStrategy {
    fn compute_alias_taints(
        &self,
        d1: &TaintAbstraction,
        src: StmtId,
        target_value: Option<Variable>,
        taint_set: &mut FxHashSet<TaintAbstraction>,
        method: MethodId,
        new_abs: &TaintAbstraction,
    ) -> AliasResult<()> {
        let program = self.manager.program();
        // The program model is authoritative for the enclosing method.
        let enclosing = program.method_of(src);
        if self.is_ignored_method(enclosing) {
            trace!(stmt = %src, method = %enclosing, "ignored method");
            return Ok(());
        }
        let Some(base) = new_abs.access_path().base() else {
            return Ok(());
        };

        trace!(
            stmt = %src,
            caller_method = %method,
            target = ?target_value,
            abs = %new_abs,
            "compute alias taints"
        );

        if program.is_call_statement(src) {
            if self.return_sites.handles_return_sites() {
                self.handle_return(d1, src, enclosing, base, taint_set, new_abs)
            } else {
                Ok(())
            }
        } else {
            self.handle_field_write(src, enclosing, base, taint_set, new_abs)
        }
    }

    fn inject_calling_context(
        &self,
        abs: &TaintAbstraction,
        _solver: Option<&dyn ForwardSolver>,
        callee: MethodId,
        call_site: StmtId,
        _source: &TaintAbstraction,
        d1: &TaintAbstraction,
    ) {
        self.incoming.record(callee, abs, call_site, d1);
    }

    fn is_flow_sensitive(&self) -> bool {
        true
    }

    fn requires_analysis_on_return(&self) -> bool {
        true
    }
}
