use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fab_util::errors::{FabError, FabResult};

use crate::instructions::Instructions;

/// The parsed representation of a `Fab.toml` file: a resolved dependency
/// tree plus the bundle instructions that steer version resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabManifest {
    pub project: ArtifactEntry,

    #[serde(default)]
    pub instructions: BTreeMap<String, String>,

    /// Resolved dependencies in resolution order.
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencyEntry>,
}

/// Fields shared by the project and each dependency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// `group:artifact` or `group:artifact:version`.
    pub coordinate: String,
    /// Explicit bundle flag; inferred from the JAR manifest when absent.
    #[serde(default)]
    pub bundle: Option<bool>,
    #[serde(default)]
    pub packages: Vec<String>,
    /// JAR to scan for packages and manifest entries.
    #[serde(default)]
    pub jar: Option<PathBuf>,
    #[serde(default)]
    pub manifest: BTreeMap<String, String>,
}

/// A `[[dependency]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEntry {
    #[serde(flatten)]
    pub artifact: ArtifactEntry,
    /// `group:artifact` of the parent; the project when absent.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub optional: bool,
    /// `false` for dependencies bundled inline rather than shared.
    #[serde(default = "default_shared")]
    pub shared: bool,
}

fn default_shared() -> bool {
    true
}

impl FabManifest {
    /// Load and parse a `Fab.toml` file from the given path.
    pub fn from_path(path: &Path) -> FabResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FabError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
        Self::parse_toml(&content)
    }

    /// Parse a `Fab.toml` from a TOML string.
    pub fn parse_toml(content: &str) -> FabResult<Self> {
        toml::from_str(content).map_err(|e| {
            FabError::Manifest {
                message: format!("Failed to parse Fab.toml: {e}"),
            }
            .into()
        })
    }

    pub fn instructions(&self) -> Instructions {
        Instructions::new(self.instructions.clone())
    }
}
