/*
 * Access Paths
 *
 * Two structurally different models of "a base plus a chain of field
 * accesses" meet in this crate:
 *
 * - EngineAccessPath: what the forward taint engine propagates. Field chain
 *   is bounded by the engine's k-limit; a path that hit the limit is marked
 *   cut-off, meaning every sub-field is implicitly included.
 * - OracleAccessPath: what the backward pointer analysis reports. Its field
 *   chain may contain segments the engine has no counterpart for (array
 *   elements) and wildcard segments standing for an unbounded set of
 *   concrete chains.
 *
 * Conversion between the two lives in infrastructure::access_path_bridge.
 */

use super::program::{FieldId, StmtId, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Engine access path: `base.f1.f2...fn`, optionally cut off
///
/// Immutable once built. `base` is `None` for facts that are not rooted in a
/// local (static-only paths, the zero fact).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineAccessPath {
    base: Option<Variable>,
    fields: Arc<[FieldId]>,
    cut_off: bool,
}

impl EngineAccessPath {
    /// Create an access path without applying any length limit
    pub fn new(base: Option<Variable>, fields: Vec<FieldId>, cut_off: bool) -> Self {
        Self {
            base,
            fields: fields.into(),
            cut_off,
        }
    }

    /// Create an access path truncated to `max_len` fields
    ///
    /// Truncation marks the path as cut off.
    pub fn k_limited(
        base: Option<Variable>,
        mut fields: Vec<FieldId>,
        mut cut_off: bool,
        max_len: usize,
    ) -> Self {
        if fields.len() > max_len {
            fields.truncate(max_len);
            cut_off = true;
        }
        Self::new(base, fields, cut_off)
    }

    /// Plain local: `base`
    pub fn local(base: Variable) -> Self {
        Self::new(Some(base), Vec::new(), false)
    }

    /// Local with fields: `base.f1...fn`
    pub fn with_fields(base: Variable, fields: Vec<FieldId>) -> Self {
        Self::new(Some(base), fields, false)
    }

    /// Path without a local base (static field chain)
    pub fn static_only(fields: Vec<FieldId>) -> Self {
        Self::new(None, fields, false)
    }

    /// The empty path carried by the zero fact
    pub fn empty() -> Self {
        Self::new(None, Vec::new(), false)
    }

    pub fn base(&self) -> Option<Variable> {
        self.base
    }

    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    pub fn last_field(&self) -> Option<FieldId> {
        self.fields.last().copied()
    }

    pub fn is_cut_off(&self) -> bool {
        self.cut_off
    }

    /// No base and no fields
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.fields.is_empty()
    }
}

impl fmt::Display for EngineAccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            Some(base) => write!(f, "{}", base)?,
            None => write!(f, "<static>")?,
        }
        for field in self.fields.iter() {
            write!(f, ".{}", field)?;
        }
        if self.cut_off {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// Field segment of an oracle access path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OracleField {
    /// A named field the engine also knows
    Field(FieldId),

    /// Array element access (no engine counterpart)
    ArrayElement,

    /// Summarized segment: any (possibly empty) sequence of fields
    Wildcard,
}

/// Base value of an oracle access path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OracleValue {
    /// Local variable or parameter
    Local(Variable),

    /// Static field used as a root
    Static(FieldId),

    /// Allocation site
    Allocation(StmtId),
}

/// Oracle access path: `base.s1.s2...sn`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OracleAccessPath {
    base: OracleValue,
    fields: Vec<OracleField>,
}

impl OracleAccessPath {
    pub fn new(base: OracleValue, fields: Vec<OracleField>) -> Self {
        Self { base, fields }
    }

    /// Plain local without fields
    pub fn local(var: Variable) -> Self {
        Self::new(OracleValue::Local(var), Vec::new())
    }

    /// Local followed by named fields
    pub fn local_with_fields(var: Variable, fields: &[FieldId]) -> Self {
        Self::new(
            OracleValue::Local(var),
            fields.iter().copied().map(OracleField::Field).collect(),
        )
    }

    pub fn base(&self) -> OracleValue {
        self.base
    }

    /// Base as a local, if it is one
    pub fn base_variable(&self) -> Option<Variable> {
        match self.base {
            OracleValue::Local(var) => Some(var),
            _ => None,
        }
    }

    pub fn fields(&self) -> &[OracleField] {
        &self.fields
    }

    /// Whether the field chain summarizes more than one concrete chain
    pub fn is_over_approximated(&self) -> bool {
        self.fields.contains(&OracleField::Wildcard)
    }
}

impl fmt::Display for OracleAccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            OracleValue::Local(var) => write!(f, "{}", var)?,
            OracleValue::Static(field) => write!(f, "static:{}", field)?,
            OracleValue::Allocation(stmt) => write!(f, "alloc@{}", stmt)?,
        }
        for field in &self.fields {
            match field {
                OracleField::Field(id) => write!(f, ".{}", id)?,
                OracleField::ArrayElement => write!(f, "[]")?,
                OracleField::Wildcard => write!(f, ".*")?,
            }
        }
        Ok(())
    }
}
