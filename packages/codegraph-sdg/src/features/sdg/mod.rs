//! System dependence graph: linked PDGs of a whole program, ready to slice.

pub mod domain;
pub mod infrastructure;

pub use domain::{BuildSummary, SdgStats};
pub use infrastructure::SystemDependenceGraph;
