//! Backward slicing over a built system dependence graph.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{CacheStats, ProgramSlicer};
pub use domain::{Slice, SliceEntry, SliceReport, SlicingCriterion};
pub use infrastructure::{ClassicSlicing, PseudoPredicateSlicing};
pub use ports::SlicingAlgorithm;
