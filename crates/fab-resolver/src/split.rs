//! Reporting of packages exported by more than one dependency.

use std::fmt;

/// Every package with competing exporters found in one index.
#[derive(Debug, Default)]
pub struct SplitPackageReport {
    pub packages: Vec<SplitPackage>,
}

/// A package provided by several dependencies. Resolution always picks the
/// first one in resolution order; the rest are shadowed.
#[derive(Debug, Clone)]
pub struct SplitPackage {
    pub package: String,
    pub winner: String,
    pub shadowed: Vec<String>,
}

impl SplitPackageReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, split: SplitPackage) {
        self.packages.push(split);
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl fmt::Display for SplitPackageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.packages.is_empty() {
            return write!(f, "No split packages.");
        }
        writeln!(f, "Split packages ({}):", self.packages.len())?;
        for p in &self.packages {
            writeln!(f, "  {p}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SplitPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} (shadows {})",
            self.package,
            self.winner,
            self.shadowed.join(", ")
        )
    }
}
