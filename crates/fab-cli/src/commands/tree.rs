//! Handler for `fab tree`.

use std::path::Path;

use fab_ops::ops_tree::{self, TreeOptions};
use miette::Result;

use super::load_project;

pub fn exec(
    manifest_path: Option<&Path>,
    depth: Option<u32>,
    why: Option<String>,
    split_packages: bool,
) -> Result<()> {
    let project = load_project(manifest_path)?;
    let opts = TreeOptions {
        depth: depth.map(|d| d as usize),
        why,
        split_packages,
    };
    print!("{}", ops_tree::tree(&project, &opts)?);
    Ok(())
}
