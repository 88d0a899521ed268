//! Feature modules

pub mod aliasing;
