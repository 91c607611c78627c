//! Package-to-dependency resolution and import/export version lookup.
//!
//! A package is resolved by scanning candidates in resolution order and
//! taking the first node whose package set contains it. A node whose
//! packages cannot be read is logged and skipped; the scan carries on.

use std::sync::Arc;

use fab_core::dependency::DependencyNode;
use fab_core::header::parse_header;
use fab_core::instructions::{Instructions, INSTR_VERSION_RANGE_DIGITS};
use fab_core::EXPORT_PACKAGE;
use fab_util::errors::FabError;

use crate::index::DependencyIndex;
use crate::version::{clean, to_version_constraint, RangeDigits};

/// Answers the version questions a manifest generator asks per package.
pub trait VersionResolver {
    /// Import constraint for `package`, or `None` to leave it unconstrained.
    fn resolve_package_version(&self, package: &str) -> Result<Option<String>, FabError>;

    /// Version to export `package` with, or `None` if nothing provides it.
    fn resolve_export_package_version(&self, package: &str) -> Result<Option<String>, FabError>;

    /// Whether the import of `package` may be marked optional.
    fn is_package_optional(&self, package: &str) -> bool;
}

/// Resolves packages against a [`DependencyIndex`].
pub struct PackageResolver<'a> {
    index: &'a DependencyIndex,
    digits: RangeDigits,
}

impl<'a> PackageResolver<'a> {
    pub fn new(index: &'a DependencyIndex, digits: RangeDigits) -> Self {
        Self { index, digits }
    }

    /// Take the range precision from bundle instructions, defaulting invalid
    /// values.
    pub fn from_instructions(index: &'a DependencyIndex, instructions: &Instructions) -> Self {
        let digits = RangeDigits::from_setting(
            INSTR_VERSION_RANGE_DIGITS,
            instructions.version_range_digits(),
        );
        Self::new(index, digits)
    }

    pub fn digits(&self) -> RangeDigits {
        self.digits
    }

    /// The shared dependency that provides `package`.
    pub fn resolve_import_dependency(&self, package: &str) -> Option<&'a Arc<DependencyNode>> {
        find_provider(package, self.index.shared_dependencies().iter())
    }

    /// The shared dependency, or failing that the root, that provides `package`.
    pub fn resolve_export_dependency(&self, package: &str) -> Option<&'a Arc<DependencyNode>> {
        find_provider(package, self.index.export_candidates())
    }

    /// Import constraint for `package`: the exporting bundle's declared
    /// package version, else the dependency's own version, as a range at the
    /// configured precision. A declared version that cannot be ranged is
    /// logged and the dependency's version is used instead.
    pub fn resolve_import_package_version(
        &self,
        package: &str,
    ) -> Result<Option<String>, FabError> {
        let Some(node) = self.resolve_import_dependency(package) else {
            tracing::debug!("No dependency provides {package}; leaving it unconstrained");
            return Ok(None);
        };
        if let Some(declared) = exported_version(node, package)? {
            match to_version_constraint(&declared, self.digits) {
                Ok(constraint) => return Ok(Some(constraint.to_string())),
                Err(e) => tracing::warn!(
                    "Ignoring the {EXPORT_PACKAGE} version of {package} on {node}: {e}"
                ),
            }
        }
        match node.version() {
            Some(version) => {
                let constraint = to_version_constraint(&clean(version), self.digits)?;
                Ok(Some(constraint.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Version to export `package` with, taken from whichever node provides it.
    pub fn resolve_export_package_version(
        &self,
        package: &str,
    ) -> Result<Option<String>, FabError> {
        match self.resolve_export_dependency(package) {
            Some(node) => package_version(node, package),
            None => Ok(None),
        }
    }

    /// Unknown packages are optional. A provided package is optional only
    /// when its dependency is optional in the tree and not force-included.
    pub fn is_package_optional(&self, package: &str) -> bool {
        match self.resolve_import_dependency(package) {
            Some(node) => {
                node.is_this_or_ancestor_optional()
                    && self.index.dependency_filter().matches(node)
            }
            None => true,
        }
    }
}

impl VersionResolver for PackageResolver<'_> {
    fn resolve_package_version(&self, package: &str) -> Result<Option<String>, FabError> {
        self.resolve_import_package_version(package)
    }

    fn resolve_export_package_version(&self, package: &str) -> Result<Option<String>, FabError> {
        PackageResolver::resolve_export_package_version(self, package)
    }

    fn is_package_optional(&self, package: &str) -> bool {
        PackageResolver::is_package_optional(self, package)
    }
}

/// First node in `candidates` that provides `package`.
fn find_provider<'n>(
    package: &str,
    candidates: impl Iterator<Item = &'n Arc<DependencyNode>>,
) -> Option<&'n Arc<DependencyNode>> {
    for node in candidates {
        match node.packages_provided() {
            Ok(packages) if packages.contains(package) => {
                tracing::debug!("{package} is provided by {node}");
                return Some(node);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to get the packages on dependency: {node}. {e}");
            }
        }
    }
    None
}

/// The OSGi version of `package` as provided by `node`.
///
/// Bundles are asked first: the `version` (or `specification-version`)
/// attribute of the package's `Export-Package` clause is returned as is.
/// Otherwise the node's own version is cleaned into OSGi syntax. A malformed
/// `Export-Package` header is an error.
pub fn package_version(node: &DependencyNode, package: &str) -> Result<Option<String>, FabError> {
    if let Some(version) = exported_version(node, package)? {
        return Ok(Some(version));
    }
    Ok(node.version().map(clean))
}

/// The version a bundle declares for `package` in its `Export-Package` header.
fn exported_version(node: &DependencyNode, package: &str) -> Result<Option<String>, FabError> {
    if !node.is_bundle() {
        return Ok(None);
    }
    let Some(exports) = node
        .manifest_entry_value(EXPORT_PACKAGE)
        .filter(|v| !v.trim().is_empty())
    else {
        return Ok(None);
    };
    let header = parse_header(EXPORT_PACKAGE, exports)?;
    let version = header.get(package).and_then(|attrs| {
        attrs
            .get("version")
            .or_else(|| attrs.get("specification-version"))
    });
    if let Some(version) = version {
        tracing::debug!("{package} exported by {node} at version {version}");
    }
    Ok(version.cloned())
}
