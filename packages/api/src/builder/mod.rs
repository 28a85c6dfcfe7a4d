//! Probe builder API modules
//!
//! Fluent configuration of a single diagnostic run and its execution.

pub mod core;
pub mod methods;
pub mod run;

pub use self::core::*;
pub use self::run::*;
