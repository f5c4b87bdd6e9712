//! Configuration for tallybook
//!
//! Resolves where the backing data file lives on each platform.

pub mod paths;

pub use paths::TallybookPaths;
