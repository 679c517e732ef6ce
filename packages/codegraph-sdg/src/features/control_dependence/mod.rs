//! Control dependence from postdominance.
//!
//! `b` is control-dependent on `a` iff `b` postdominates one but not all CFG
//! successors of `a`. Two interchangeable builders compute the relation: the
//! postdominator-tree builder used in production and the naive pairwise one
//! kept as an oracle.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::build_control_dependence;
pub use domain::AnalysisGraph;
pub use infrastructure::{NaiveControlDependence, PostdominatorTree, PostdominatorTreeControlDependence};
pub use ports::ControlDependenceBuilder;
