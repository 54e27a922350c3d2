pub mod branch;
pub mod locator;
pub mod tree;
