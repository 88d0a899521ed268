//! Alias resolution use cases

pub mod site_strategy;

pub use site_strategy::AliasSiteStrategy;
