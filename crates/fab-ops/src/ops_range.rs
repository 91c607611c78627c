//! Operation: synthesize a version range directly.

use fab_resolver::version::to_version_range;
use fab_util::errors::FabResult;

/// Strict range synthesis: `digits` outside `0..=4` is an error.
pub fn range(version: &str, digits: i64) -> FabResult<String> {
    Ok(to_version_range(version, digits)?)
}
