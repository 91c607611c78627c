//! Package version resolution for bundle manifests.
//!
//! Given a resolved dependency tree, find which dependency provides an
//! imported Java package and compute the version constraint (an exact
//! version or a half-open range) to put in the importing bundle's manifest.

pub mod graph;
pub mod imports;
pub mod index;
pub mod resolver;
pub mod split;
pub mod version;
