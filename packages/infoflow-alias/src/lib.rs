/*
 * Infoflow Alias - on-demand alias resolution for forward taint analysis
 *
 * Bridges a forward IFDS-style taint engine and a backward, demand-driven
 * pointer analysis:
 * - features/aliasing : site classification, query/session management,
 *                       access-path translation
 * - config/           : presets + YAML
 * - errors            : crate error type
 *
 * Concurrency:
 * - taint workers call in from many threads
 * - oracle queries are serialized behind one lock
 */

#![allow(clippy::too_many_arguments)] // Host-facing signatures mirror the engine's callbacks
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Feature modules
pub mod features;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AliasConfig, ConfigError, Preset};
pub use errors::{AliasError, AliasResult};
pub use features::aliasing::*;
