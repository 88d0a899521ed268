//! Domain types for alias resolution

pub mod abstraction;
pub mod access_path;
pub mod program;
pub mod query;
pub mod strategy;

pub use abstraction::{TaintAbstraction, TaintSource};
pub use access_path::{EngineAccessPath, OracleAccessPath, OracleField, OracleValue};
pub use program::{FieldId, MethodId, StmtId, Variable};
pub use query::{AliasQuery, ControlFlowEdge};
pub use strategy::{ReturnSiteMode, SparsificationStrategy};
