//! Filter deciding whether an optional dependency stays optional.

use globset::{Glob, GlobSet, GlobSetBuilder};

use fab_util::errors::FabError;

use crate::dependency::DependencyNode;

/// Matches dependencies that keep their optional status.
///
/// Built from `group:artifact` glob patterns naming dependencies that are
/// force-included. A dependency matched by any pattern is *not* matched by
/// the filter; everything else is. A pattern without `:` covers a whole group.
#[derive(Debug, Clone)]
pub struct OptionalDependencyFilter {
    patterns: Vec<String>,
    included: GlobSet,
}

impl OptionalDependencyFilter {
    /// A filter that force-includes nothing.
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
            included: GlobSet::empty(),
        }
    }

    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, FabError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            let pattern = if pattern.contains(':') {
                pattern.to_string()
            } else {
                format!("{pattern}:*")
            };
            let glob = Glob::new(&pattern).map_err(|e| FabError::Manifest {
                message: format!("Invalid optional dependency pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
            kept.push(pattern);
        }
        let included = builder.build().map_err(|e| FabError::Manifest {
            message: format!("Invalid optional dependency patterns: {e}"),
        })?;
        Ok(Self {
            patterns: kept,
            included,
        })
    }

    /// Parse a comma-separated pattern list as found in bundle instructions.
    pub fn parse(value: &str) -> Result<Self, FabError> {
        Self::from_patterns(value.split(','))
    }

    /// `true` when `node` is not force-included.
    pub fn matches(&self, node: &DependencyNode) -> bool {
        !self.included.is_match(node.coordinate().key())
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for OptionalDependencyFilter {
    fn default() -> Self {
        Self::none()
    }
}
