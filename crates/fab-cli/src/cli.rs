//! CLI argument definitions for fab.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fab",
    version,
    about = "Resolve OSGi package versions for an application bundle",
    long_about = "fab reads a resolved dependency tree from Fab.toml and answers the questions \
                  a bundle manifest generator asks: which dependency provides a package, which \
                  version range to import it with, and whether the import is optional."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to Fab.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub manifest_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the import version constraint for each package
    Resolve {
        /// Java package names
        #[arg(required = true)]
        packages: Vec<String>,
        /// Version range digits (0-4); invalid values fall back to 3
        #[arg(long, env = "FAB_VERSION_RANGE_DIGITS")]
        digits: Option<String>,
    },

    /// Print the version each package would be exported with
    Export {
        /// Java package names
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Print whether each package import is optional
    Optional {
        /// Java package names
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Render Import-Package clauses for the given packages
    Imports {
        /// Java package names
        #[arg(required = true)]
        packages: Vec<String>,
        /// Version range digits (0-4); invalid values fall back to 3
        #[arg(long, env = "FAB_VERSION_RANGE_DIGITS")]
        digits: Option<String>,
        /// Print clauses as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display the dependency tree
    Tree {
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
        /// Explain why a dependency is included
        #[arg(long)]
        why: Option<String>,
        /// Show packages exported by more than one dependency
        #[arg(long)]
        split_packages: bool,
    },

    /// Synthesize a version range from a version
    Range {
        /// Version text, e.g. 1.2.3 or 1.2-SNAPSHOT
        version: String,
        /// Number of version segments to keep (0-4, 4 = exact)
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        digits: i64,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
