//! Shared utilities for the fab bundle tooling.
//!
//! This crate provides cross-cutting concerns used by all other fab crates:
//! the unified error type, filesystem helpers, and Cargo-style status lines.

pub mod errors;
pub mod fs;
pub mod progress;
