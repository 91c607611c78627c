//! Bundle instructions: string-keyed build settings read from the project.

use std::collections::BTreeMap;

use fab_util::errors::FabError;

use crate::filter::OptionalDependencyFilter;

/// Number of version segments kept when synthesizing import ranges.
pub const INSTR_VERSION_RANGE_DIGITS: &str = "FAB-Version-Range-Digits";

/// Comma-separated `group:artifact` patterns of optional dependencies that
/// must be treated as required.
pub const INSTR_INCLUDE_OPTIONAL: &str = "FAB-Include-Optional-Dependency";

/// Instruction values keyed by header name.
#[derive(Debug, Clone, Default)]
pub struct Instructions {
    values: BTreeMap<String, String>,
}

impl Instructions {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Look up an instruction, treating blank values as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The raw, unvalidated range precision setting.
    pub fn version_range_digits(&self) -> Option<&str> {
        self.get(INSTR_VERSION_RANGE_DIGITS)
    }

    /// Build the optional-dependency filter from the include instruction.
    pub fn optional_dependency_filter(&self) -> Result<OptionalDependencyFilter, FabError> {
        match self.get(INSTR_INCLUDE_OPTIONAL) {
            Some(value) => OptionalDependencyFilter::parse(value),
            None => Ok(OptionalDependencyFilter::none()),
        }
    }
}
