//! classmatch-core
//!
//! Core library for matching classes across two versions of a compiled application
//! package, even when identifiers were obfuscated between the versions.
//!
//! This crate defines the input model handed over by a bytecode parser, the obfuscation
//! classifiers, class signatures and their distance, the class/package pools, and the
//! staged matching pipeline that produces ranked candidates for every old class.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, bindings, etc.).

pub mod config;
pub mod diff;
pub mod error;
pub mod filters;
pub mod matching;
pub mod model;
pub mod obfuscation;
pub mod pool;
pub mod signature;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
