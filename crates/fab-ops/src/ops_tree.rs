//! Operation: display the dependency tree.

use fab_util::errors::FabResult;

use crate::project::Project;

/// Options for `fab tree`.
#[derive(Default)]
pub struct TreeOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show the path from the project to a specific dependency.
    pub why: Option<String>,
    /// Show packages exported by more than one shared dependency.
    pub split_packages: bool,
}

/// Render the requested tree view for the project.
pub fn tree(project: &Project, opts: &TreeOptions) -> FabResult<String> {
    if let Some(ref target) = opts.why {
        let Some(path) = project.tree.find_path(target) else {
            return Ok(format!("Dependency '{target}' not found in the tree.\n"));
        };
        let mut out = format!("Path to {target}:\n");
        for (i, node) in path.iter().enumerate() {
            let indent = "  ".repeat(i);
            out.push_str(&format!("{indent}{node}\n"));
        }
        return Ok(out);
    }

    if opts.split_packages {
        let mut out = project.index()?.split_packages().to_string();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        return Ok(out);
    }

    Ok(project.tree.print_tree(opts.depth))
}
