//! Locating and loading a `Fab.toml` project.

use std::path::{Path, PathBuf};

use fab_core::instructions::{Instructions, INSTR_VERSION_RANGE_DIGITS};
use fab_core::manifest::FabManifest;
use fab_resolver::graph::DependencyTree;
use fab_resolver::index::DependencyIndex;
use fab_resolver::resolver::PackageResolver;
use fab_util::errors::{FabError, FabResult};
use fab_util::fs::find_in_ancestors;

pub const MANIFEST_FILE: &str = "Fab.toml";

/// A loaded project: its resolved tree and effective instructions.
pub struct Project {
    pub root_dir: PathBuf,
    pub tree: DependencyTree,
    pub instructions: Instructions,
}

impl Project {
    /// Load `manifest_path`, or the nearest `Fab.toml` above `cwd`.
    pub fn load(manifest_path: Option<&Path>, cwd: &Path) -> FabResult<Self> {
        let path = match manifest_path {
            Some(p) => p.to_path_buf(),
            None => find_in_ancestors(cwd, MANIFEST_FILE).ok_or_else(|| FabError::Manifest {
                message: format!(
                    "Could not find {MANIFEST_FILE} in {} or any parent directory",
                    cwd.display()
                ),
            })?,
        };
        let root_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());

        let manifest = FabManifest::from_path(&path)?;
        let tree = DependencyTree::from_manifest(&manifest, &root_dir)?;
        let instructions = manifest.instructions();
        tracing::debug!(
            "Loaded {} with {} dependencies",
            path.display(),
            tree.len()
        );
        Ok(Self {
            root_dir,
            tree,
            instructions,
        })
    }

    /// Replace the configured range precision. The value is still validated
    /// leniently when the resolver is created.
    pub fn override_digits(&mut self, digits: Option<&str>) {
        if let Some(digits) = digits {
            self.instructions.set(INSTR_VERSION_RANGE_DIGITS, digits);
        }
    }

    pub fn index(&self) -> FabResult<DependencyIndex> {
        let filter = self.instructions.optional_dependency_filter()?;
        Ok(DependencyIndex::from_tree(&self.tree, filter))
    }

    pub fn resolver<'a>(&self, index: &'a DependencyIndex) -> PackageResolver<'a> {
        PackageResolver::from_instructions(index, &self.instructions)
    }
}
