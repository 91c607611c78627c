//! Read-only view over a resolved dependency tree for package lookups.

use std::collections::BTreeMap;
use std::sync::Arc;

use fab_core::dependency::DependencyNode;
use fab_core::filter::OptionalDependencyFilter;

use crate::graph::DependencyTree;
use crate::split::{SplitPackage, SplitPackageReport};

/// The candidates a resolver scans, fixed for one resolution pass.
///
/// Shared dependencies are kept in resolution order; scans walk them front
/// to back and the first exporter wins.
#[derive(Debug, Clone)]
pub struct DependencyIndex {
    shared: Vec<Arc<DependencyNode>>,
    root: Arc<DependencyNode>,
    filter: OptionalDependencyFilter,
}

impl DependencyIndex {
    pub fn new(
        shared: Vec<Arc<DependencyNode>>,
        root: Arc<DependencyNode>,
        filter: OptionalDependencyFilter,
    ) -> Self {
        Self {
            shared,
            root,
            filter,
        }
    }

    pub fn from_tree(tree: &DependencyTree, filter: OptionalDependencyFilter) -> Self {
        Self::new(tree.shared_dependencies(), Arc::clone(tree.root()), filter)
    }

    /// Candidates for imported packages.
    pub fn shared_dependencies(&self) -> &[Arc<DependencyNode>] {
        &self.shared
    }

    pub fn root_node(&self) -> &Arc<DependencyNode> {
        &self.root
    }

    /// Used to qualify optionality only, never to drop candidates.
    pub fn dependency_filter(&self) -> &OptionalDependencyFilter {
        &self.filter
    }

    /// Candidates for exported packages: the shared dependencies, then the
    /// root, so a dependency wins over the project itself.
    pub fn export_candidates(&self) -> impl Iterator<Item = &Arc<DependencyNode>> {
        self.shared.iter().chain(std::iter::once(&self.root))
    }

    /// Packages provided by more than one shared dependency.
    pub fn split_packages(&self) -> SplitPackageReport {
        let mut exporters: BTreeMap<&str, Vec<&Arc<DependencyNode>>> = BTreeMap::new();
        for node in &self.shared {
            match node.packages_provided() {
                Ok(packages) => {
                    for package in packages {
                        exporters.entry(package.as_str()).or_default().push(node);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to get the packages on dependency: {node}. {e}");
                }
            }
        }

        let mut report = SplitPackageReport::new();
        for (package, nodes) in exporters {
            if let [winner, shadowed @ ..] = nodes.as_slice() {
                if !shadowed.is_empty() {
                    report.add(SplitPackage {
                        package: package.to_string(),
                        winner: winner.coordinate().to_string(),
                        shadowed: shadowed.iter().map(|n| n.coordinate().to_string()).collect(),
                    });
                }
            }
        }
        report
    }
}
