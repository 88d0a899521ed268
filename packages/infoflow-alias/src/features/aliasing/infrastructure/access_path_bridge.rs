/*
 * Access Path Bridge
 *
 * Translates between the oracle's access paths and the taint engine's.
 *
 * Pipeline applied to an oracle answer:
 * 1. filter_self_alias: drop results rooted at the queried variable
 *    (every variable trivially aliases itself)
 * 2. append_fields: re-attach the field suffix the engine fact carried,
 *    since the oracle was queried for the bare base variable
 * 3. to_engine_abstraction: map back into the engine model, k-limited
 *
 * Step 3 may fail for paths the engine cannot express. Those paths are
 * dropped by the caller; a failure never aborts the batch.
 */

use crate::features::aliasing::domain::{
    EngineAccessPath, FieldId, OracleAccessPath, OracleField, OracleValue, StmtId,
    TaintAbstraction, Variable,
};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Oracle path the engine model cannot represent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// Base is not a local (static root, allocation site)
    #[error("Oracle base {0:?} has no engine counterpart")]
    UnmappableBase(OracleValue),

    /// Field segment has no engine counterpart
    #[error("Oracle field {field:?} at position {position} has no engine counterpart")]
    UnmappableField { field: OracleField, position: usize },
}

/// Translation between oracle and engine access paths
#[derive(Debug, Clone, Copy)]
pub struct AccessPathBridge {
    /// Engine k-limit applied on the way back
    access_path_length: usize,
}

impl AccessPathBridge {
    pub fn new(access_path_length: usize) -> Self {
        Self { access_path_length }
    }

    pub fn access_path_length(&self) -> usize {
        self.access_path_length
    }

    /// Keep only results whose base is not `queried`
    pub fn filter_self_alias<'a>(
        queried: Variable,
        results: impl IntoIterator<Item = &'a OracleAccessPath>,
    ) -> FxHashSet<OracleAccessPath> {
        results
            .into_iter()
            .filter(|ap| ap.base_variable() != Some(queried))
            .cloned()
            .collect()
    }

    /// `ap.fields ++ suffix`, same base
    ///
    /// An empty suffix returns `ap` unchanged.
    pub fn append_fields(ap: &OracleAccessPath, suffix: &[FieldId]) -> OracleAccessPath {
        if suffix.is_empty() {
            return ap.clone();
        }
        let mut fields = Vec::with_capacity(ap.fields().len() + suffix.len());
        fields.extend_from_slice(ap.fields());
        fields.extend(suffix.iter().copied().map(OracleField::Field));
        OracleAccessPath::new(ap.base(), fields)
    }

    /// Map an oracle path into the engine model
    ///
    /// A wildcard segment ends the translated chain and marks the path cut
    /// off: the engine then covers every sub-field, which includes whatever
    /// the wildcard summarized. Segments after a wildcard are subsumed.
    pub fn to_engine_path(
        &self,
        ap: &OracleAccessPath,
    ) -> Result<EngineAccessPath, TranslationError> {
        let base = match ap.base() {
            OracleValue::Local(var) => var,
            other => return Err(TranslationError::UnmappableBase(other)),
        };

        let mut fields = Vec::with_capacity(ap.fields().len());
        let mut cut_off = false;
        for (position, field) in ap.fields().iter().enumerate() {
            match *field {
                OracleField::Field(id) => fields.push(id),
                OracleField::Wildcard => {
                    cut_off = true;
                    break;
                }
                OracleField::ArrayElement => {
                    return Err(TranslationError::UnmappableField {
                        field: *field,
                        position,
                    })
                }
            }
        }

        Ok(EngineAccessPath::k_limited(
            Some(base),
            fields,
            cut_off,
            self.access_path_length,
        ))
    }

    /// Derive a new engine abstraction for `ap` from `source` at `stmt`
    pub fn to_engine_abstraction(
        &self,
        ap: &OracleAccessPath,
        stmt: StmtId,
        source: &TaintAbstraction,
    ) -> Result<TaintAbstraction, TranslationError> {
        let engine_ap = self.to_engine_path(ap)?;
        Ok(source.derive_new_abstraction(engine_ap, stmt))
    }
}
