//! Rendering of `Import-Package` clauses from resolved package versions.

use std::collections::HashSet;
use std::fmt;

use fab_util::errors::FabError;
use serde::Serialize;

use crate::resolver::VersionResolver;

/// One `Import-Package` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportClause {
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub optional: bool,
}

impl fmt::Display for ImportClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.package)?;
        if let Some(ref version) = self.version {
            write!(f, ";version=\"{version}\"")?;
        }
        if self.optional {
            f.write_str(";resolution:=optional")?;
        }
        Ok(())
    }
}

/// Resolve each distinct package once, keeping first-seen order.
pub fn collect_imports<R, I, S>(resolver: &R, packages: I) -> Result<Vec<ImportClause>, FabError>
where
    R: VersionResolver + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut clauses = Vec::new();
    for package in packages {
        let package = package.as_ref().trim();
        if package.is_empty() || !seen.insert(package.to_string()) {
            continue;
        }
        clauses.push(ImportClause {
            package: package.to_string(),
            version: resolver.resolve_package_version(package)?,
            optional: resolver.is_package_optional(package),
        });
    }
    Ok(clauses)
}

/// Join clauses into a single header value.
pub fn render_header(clauses: &[ImportClause]) -> String {
    clauses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
