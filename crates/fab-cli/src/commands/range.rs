//! Handler for `fab range`.

use fab_ops::ops_range;
use fab_util::progress::status_warn;
use miette::Result;

pub fn exec(version: &str, digits: i64) -> Result<()> {
    if digits == 4 {
        status_warn("Exact", &format!("{version} is pinned without a range"));
    }
    println!("{}", ops_range::range(version, digits)?);
    Ok(())
}
