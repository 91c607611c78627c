use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all fab operations.
#[derive(Debug, Error, Diagnostic)]
pub enum FabError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project descriptor (e.g. Fab.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Fab.toml for syntax errors"))]
    Manifest { message: String },

    /// A structured manifest header (e.g. Export-Package) could not be parsed.
    #[error("Invalid {header} header: {message}")]
    #[diagnostic(help("Fix the bundle's manifest; clauses are `name;key=value` separated by commas"))]
    Header { header: String, message: String },

    /// Version text is not a valid OSGi version.
    #[error("Invalid version '{version}': {message}")]
    Version { version: String, message: String },

    /// Version range precision outside the supported 0..=4 digits.
    #[error("Invalid version range digits: {digits} (expected 0 to 4)")]
    InvalidDigits { digits: i64 },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type FabResult<T> = miette::Result<T>;
