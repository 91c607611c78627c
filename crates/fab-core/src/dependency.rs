use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::archive;

/// Maven-style coordinates of a resolved artifact.
///
/// The version is optional: a node may be known only by `group:artifact`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<&str>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.map(str::to_string),
        }
    }

    /// Parse `"group:artifact"` or `"group:artifact:version"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [group, artifact] => Some(Self::new(*group, *artifact, None)),
            [group, artifact, version] => Some(Self::new(*group, *artifact, Some(*version))),
            _ => None,
        }
    }

    /// `group:artifact` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, v),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

/// Where a node's provided packages come from.
#[derive(Debug, Clone)]
enum PackageSource {
    /// Packages declared up front.
    Listed(BTreeSet<String>),
    /// Packages discovered by scanning a JAR on first use.
    Archive(PathBuf),
}

impl Default for PackageSource {
    fn default() -> Self {
        Self::Listed(BTreeSet::new())
    }
}

/// One resolved dependency in a dependency tree.
///
/// Built with the fluent setters below, then shared read-only (typically
/// behind an `Arc`) for the rest of a resolution pass. The only interior
/// state is the package cache of archive-backed nodes, which is filled at
/// most once.
#[derive(Debug)]
pub struct DependencyNode {
    coordinate: Coordinate,
    bundle: bool,
    optional: bool,
    ancestor_optional: bool,
    manifest: BTreeMap<String, String>,
    source: PackageSource,
    scanned: OnceLock<BTreeSet<String>>,
}

impl DependencyNode {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            bundle: false,
            optional: false,
            ancestor_optional: false,
            manifest: BTreeMap::new(),
            source: PackageSource::default(),
            scanned: OnceLock::new(),
        }
    }

    /// Mark whether this node carries OSGi bundle metadata.
    pub fn bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    /// Mark this node itself as optional.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Record that some ancestor of this node in the tree is optional.
    pub fn inherit_optional(mut self, ancestor_optional: bool) -> Self {
        self.ancestor_optional = ancestor_optional;
        self
    }

    /// Declare the provided packages explicitly.
    pub fn packages(mut self, packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.source = PackageSource::Listed(packages.into_iter().map(Into::into).collect());
        self
    }

    /// Discover the provided packages from a JAR on first use.
    pub fn archive(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = PackageSource::Archive(path.into());
        self
    }

    /// Set a raw manifest entry.
    pub fn manifest_entry(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.manifest.insert(name.into(), value.into());
        self
    }

    /// Set several raw manifest entries, overwriting existing names.
    pub fn manifest_entries(mut self, entries: impl IntoIterator<Item = (String, String)>) -> Self {
        self.manifest.extend(entries);
        self
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn is_bundle(&self) -> bool {
        self.bundle
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// `true` if this node or any of its ancestors is optional.
    pub fn is_this_or_ancestor_optional(&self) -> bool {
        self.optional || self.ancestor_optional
    }

    /// The declared version, if any.
    pub fn version(&self) -> Option<&str> {
        self.coordinate.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Look up a raw manifest entry by header name.
    pub fn manifest_entry_value(&self, name: &str) -> Option<&str> {
        self.manifest.get(name).map(String::as_str)
    }

    /// The Java packages this node provides.
    ///
    /// Archive-backed nodes scan their JAR the first time this is called and
    /// reuse the result afterwards. A failed scan is not cached.
    pub fn packages_provided(&self) -> io::Result<&BTreeSet<String>> {
        match &self.source {
            PackageSource::Listed(packages) => Ok(packages),
            PackageSource::Archive(path) => {
                if let Some(packages) = self.scanned.get() {
                    return Ok(packages);
                }
                let packages = archive::read_packages(path)?;
                Ok(self.scanned.get_or_init(|| packages))
            }
        }
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}
