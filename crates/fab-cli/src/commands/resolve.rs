//! Handlers for `fab resolve`, `fab export` and `fab optional`.

use std::path::Path;

use fab_ops::ops_resolve::{self, print_answers};
use miette::Result;

use super::load_project;

pub fn exec_resolve(
    manifest_path: Option<&Path>,
    packages: &[String],
    digits: Option<&str>,
) -> Result<()> {
    let mut project = load_project(manifest_path)?;
    project.override_digits(digits);
    print_answers(&ops_resolve::resolve(&project, packages)?);
    Ok(())
}

pub fn exec_export(manifest_path: Option<&Path>, packages: &[String]) -> Result<()> {
    let project = load_project(manifest_path)?;
    print_answers(&ops_resolve::export(&project, packages)?);
    Ok(())
}

pub fn exec_optional(manifest_path: Option<&Path>, packages: &[String]) -> Result<()> {
    let project = load_project(manifest_path)?;
    print_answers(&ops_resolve::optional(&project, packages)?);
    Ok(())
}
