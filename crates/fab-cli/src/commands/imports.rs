//! Handler for `fab imports`.

use std::path::Path;

use fab_ops::ops_resolve;
use fab_util::progress::status;
use miette::Result;

use super::load_project;

pub fn exec(
    manifest_path: Option<&Path>,
    packages: &[String],
    digits: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut project = load_project(manifest_path)?;
    project.override_digits(digits);
    let clauses = ops_resolve::imports(&project, packages)?;
    let rendered = ops_resolve::render_imports(&clauses, json)?;
    if !json {
        status("Resolved", &format!("{} import clause(s)", clauses.len()));
    }
    println!("{rendered}");
    Ok(())
}
