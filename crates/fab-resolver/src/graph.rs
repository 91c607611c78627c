//! Resolved dependency tree construction and traversal.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use fab_core::archive;
use fab_core::dependency::{Coordinate, DependencyNode};
use fab_core::manifest::{ArtifactEntry, FabManifest};
use fab_core::BUNDLE_SYMBOLIC_NAME;
use fab_util::errors::FabError;
use fab_util::fs::resolve_against;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// A resolved dependency tree backed by petgraph.
///
/// Nodes are kept in resolution order; that order decides which dependency
/// wins when several export the same package.
#[derive(Debug)]
pub struct DependencyTree {
    graph: DiGraph<Arc<DependencyNode>, ()>,
    /// Lookup from `group:artifact` to node index.
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
    /// Dependencies in resolution order (root excluded).
    order: Vec<NodeIndex>,
    /// Dependencies bundled inline instead of shared.
    inline: HashSet<NodeIndex>,
}

impl DependencyTree {
    /// Start a tree with only its root node.
    pub fn new(root: DependencyNode) -> Self {
        let mut graph = DiGraph::new();
        let key = root.coordinate().key();
        let root = graph.add_node(Arc::new(root));
        Self {
            graph,
            index: HashMap::from([(key, root)]),
            root,
            order: Vec::new(),
            inline: HashSet::new(),
        }
    }

    /// Append a dependency below `parent` (the root when `None`).
    ///
    /// The node inherits the optional status of its ancestors. Keys must be
    /// unique and parents must already be present.
    pub fn add_dependency(
        &mut self,
        node: DependencyNode,
        parent: Option<&str>,
        shared: bool,
    ) -> Result<NodeIndex, FabError> {
        let key = node.coordinate().key();
        if self.index.contains_key(&key) {
            return Err(FabError::Manifest {
                message: format!("Dependency '{key}' is declared more than once"),
            });
        }
        let parent_idx = match parent {
            Some(p) => self.find(p).ok_or_else(|| FabError::Manifest {
                message: format!(
                    "Dependency '{key}' names parent '{p}' which is not declared before it"
                ),
            })?,
            None => self.root,
        };
        let inherited = parent_idx != self.root
            && self.graph[parent_idx].is_this_or_ancestor_optional();

        let idx = self.graph.add_node(Arc::new(node.inherit_optional(inherited)));
        self.graph.add_edge(parent_idx, idx, ());
        self.index.insert(key, idx);
        self.order.push(idx);
        if !shared {
            self.inline.insert(idx);
        }
        Ok(idx)
    }

    /// Build the tree described by a `Fab.toml`. Relative JAR paths resolve
    /// against `base_dir`.
    pub fn from_manifest(manifest: &FabManifest, base_dir: &Path) -> Result<Self, FabError> {
        let mut tree = Self::new(build_node(&manifest.project, base_dir)?);
        for dep in &manifest.dependencies {
            let node = build_node(&dep.artifact, base_dir)?.optional(dep.optional);
            tree.add_dependency(node, dep.parent.as_deref(), dep.shared)?;
        }
        Ok(tree)
    }

    pub fn root(&self) -> &Arc<DependencyNode> {
        &self.graph[self.root]
    }

    /// Shared (not inline) dependencies in resolution order.
    pub fn shared_dependencies(&self) -> Vec<Arc<DependencyNode>> {
        self.order
            .iter()
            .filter(|idx| !self.inline.contains(*idx))
            .map(|&idx| Arc::clone(&self.graph[idx]))
            .collect()
    }

    /// Look up a node by `group:artifact`, falling back to a bare artifact name.
    pub fn find(&self, key: &str) -> Option<NodeIndex> {
        if let Some(&idx) = self.index.get(key) {
            return Some(idx);
        }
        self.order
            .iter()
            .copied()
            .find(|&idx| self.graph[idx].coordinate().artifact_id == key)
    }

    pub fn node(&self, idx: NodeIndex) -> &Arc<DependencyNode> {
        &self.graph[idx]
    }

    /// Direct children of a node, in declaration order.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        children.sort();
        children
    }

    fn parent_of(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .next()
    }

    /// The chain of nodes from the root down to `key`.
    pub fn find_path(&self, key: &str) -> Option<Vec<&Arc<DependencyNode>>> {
        let mut idx = self.find(key)?;
        let mut path = vec![&self.graph[idx]];
        while let Some(parent) = self.parent_of(idx) {
            path.push(&self.graph[parent]);
            idx = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Render the tree with box-drawing connectors.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = format!("{}\n", self.root());
        let children = self.dependencies_of(self.root);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(&mut output, child, "", i == count - 1, 1, max_depth);
        }
        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        output.push_str(&format!("{prefix}{connector}{node}"));
        if node.is_optional() {
            output.push_str(" (optional)");
        }
        if self.inline.contains(&idx) {
            output.push_str(" (inline)");
        }
        output.push('\n');

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.dependencies_of(idx);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(output, child, &child_prefix, i == count - 1, depth + 1, max_depth);
        }
    }

    /// Number of dependencies (excluding root).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Turn a descriptor entry into a node, reading the JAR manifest if one is
/// configured. Explicit manifest entries override those found in the JAR.
fn build_node(entry: &ArtifactEntry, base_dir: &Path) -> Result<DependencyNode, FabError> {
    let coordinate = Coordinate::parse(&entry.coordinate).ok_or_else(|| FabError::Manifest {
        message: format!(
            "Invalid coordinate '{}': expected group:artifact[:version]",
            entry.coordinate
        ),
    })?;
    let mut node = DependencyNode::new(coordinate);

    let mut bundle = entry.bundle;
    if let Some(ref jar) = entry.jar {
        let jar = resolve_against(base_dir, jar);
        let found = match archive::read_manifest(&jar) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Failed to read the manifest of {}: {e}", jar.display());
                Default::default()
            }
        };
        bundle = bundle.or(Some(found.contains_key(BUNDLE_SYMBOLIC_NAME)));
        node = node.manifest_entries(found);
        if entry.packages.is_empty() {
            node = node.archive(jar);
        }
    }
    if !entry.packages.is_empty() {
        node = node.packages(entry.packages.iter().cloned());
    }

    Ok(node
        .manifest_entries(entry.manifest.clone())
        .bundle(bundle.unwrap_or(false)))
}
