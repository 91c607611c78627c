//! Command dispatch and handler modules.

mod imports;
mod range;
mod resolve;
mod tree;

use std::path::Path;

use fab_ops::project::Project;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    tracing::debug!("Running {:?}", cli.command);
    let manifest_path = cli.manifest_path.as_deref();
    match cli.command {
        Command::Resolve { packages, digits } => {
            resolve::exec_resolve(manifest_path, &packages, digits.as_deref())
        }
        Command::Export { packages } => resolve::exec_export(manifest_path, &packages),
        Command::Optional { packages } => resolve::exec_optional(manifest_path, &packages),
        Command::Imports {
            packages,
            digits,
            json,
        } => imports::exec(manifest_path, &packages, digits.as_deref(), json),
        Command::Tree {
            depth,
            why,
            split_packages,
        } => tree::exec(manifest_path, depth, why, split_packages),
        Command::Range { version, digits } => range::exec(&version, digits),
    }
}

/// Load the project for commands that need one.
fn load_project(manifest_path: Option<&Path>) -> Result<Project> {
    let cwd = std::env::current_dir().map_err(fab_util::errors::FabError::Io)?;
    Project::load(manifest_path, &cwd)
}
