pub mod ops_range;
pub mod ops_resolve;
pub mod ops_tree;
pub mod project;
