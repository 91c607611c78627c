//! Core data types for fab.
//!
//! This crate defines the fundamental types that describe a resolved bundle
//! project: dependency coordinates and nodes, structured manifest headers,
//! JAR archive scanning, the optional-dependency filter, bundle instructions,
//! and the `Fab.toml` project descriptor.
//!
//! This crate is intentionally free of resolution policy; see `fab-resolver`.

/// Manifest header listing the packages a bundle exports.
pub const EXPORT_PACKAGE: &str = "Export-Package";

/// Manifest header whose presence marks a JAR as an OSGi bundle.
pub const BUNDLE_SYMBOLIC_NAME: &str = "Bundle-SymbolicName";

pub mod archive;
pub mod dependency;
pub mod filter;
pub mod header;
pub mod instructions;
pub mod manifest;
