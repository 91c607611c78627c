//! Operations: per-package import versions, export versions, optionality,
//! and rendered import clauses.

use fab_resolver::imports::{collect_imports, render_header, ImportClause};
use fab_resolver::resolver::VersionResolver;
use fab_util::errors::{FabError, FabResult};

use crate::project::Project;

/// One answered package query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageAnswer {
    pub package: String,
    pub answer: String,
}

fn answer_all<F>(packages: &[String], mut f: F) -> FabResult<Vec<PackageAnswer>>
where
    F: FnMut(&str) -> Result<String, FabError>,
{
    packages
        .iter()
        .map(|package| -> FabResult<PackageAnswer> {
            Ok(PackageAnswer {
                package: package.clone(),
                answer: f(package)?,
            })
        })
        .collect()
}

/// Import-side constraint for each package.
pub fn resolve(project: &Project, packages: &[String]) -> FabResult<Vec<PackageAnswer>> {
    let index = project.index()?;
    let resolver = project.resolver(&index);
    tracing::debug!("Resolving imports with {} range digits", resolver.digits());
    answer_all(packages, |p| {
        Ok(resolver
            .resolve_package_version(p)?
            .unwrap_or_else(|| "(unconstrained)".to_string()))
    })
}

/// Export-side version for each package.
pub fn export(project: &Project, packages: &[String]) -> FabResult<Vec<PackageAnswer>> {
    let index = project.index()?;
    let resolver = project.resolver(&index);
    answer_all(packages, |p| {
        Ok(resolver
            .resolve_export_package_version(p)?
            .unwrap_or_else(|| "(not found)".to_string()))
    })
}

/// Whether each package's import is optional.
pub fn optional(project: &Project, packages: &[String]) -> FabResult<Vec<PackageAnswer>> {
    let index = project.index()?;
    let resolver = project.resolver(&index);
    answer_all(packages, |p| {
        Ok(if resolver.is_package_optional(p) {
            "optional"
        } else {
            "required"
        }
        .to_string())
    })
}

/// Resolve `Import-Package` clauses for the given packages, one per
/// distinct name.
pub fn imports(project: &Project, packages: &[String]) -> FabResult<Vec<ImportClause>> {
    let index = project.index()?;
    let resolver = project.resolver(&index);
    Ok(collect_imports(&resolver, packages)?)
}

/// Render clauses as a header value, or as pretty JSON.
pub fn render_imports(clauses: &[ImportClause], json: bool) -> FabResult<String> {
    if json {
        serde_json::to_string_pretty(clauses).map_err(|e| {
            FabError::Generic {
                message: format!("Failed to serialize import clauses: {e}"),
            }
            .into()
        })
    } else {
        Ok(render_header(clauses))
    }
}

/// Print answers as aligned `package -> answer` lines.
pub fn print_answers(answers: &[PackageAnswer]) {
    let width = answers.iter().map(|a| a.package.len()).max().unwrap_or(0);
    for a in answers {
        println!("{:<width$} -> {}", a.package, a.answer);
    }
}
