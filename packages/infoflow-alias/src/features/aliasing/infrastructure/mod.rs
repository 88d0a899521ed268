//! Alias resolution infrastructure

pub mod access_path_bridge;
pub mod calling_context;
pub mod eval;
pub mod manager;
pub mod query_builder;
pub mod query_cache;
pub mod session;

pub use access_path_bridge::{AccessPathBridge, TranslationError};
pub use calling_context::{CallingContext, CallingContextRecorder};
pub use eval::AliasEvalReport;
pub use manager::SparseAliasManager;
pub use query_builder::AliasQueryBuilder;
pub use query_cache::{AliasSet, QueryCache};
pub use session::{AliasSession, SessionCounters};
