//! Summary arcs: actual-in → actual-out shortcuts at call sites.
//!
//! Pipeline: `SummaryArcBuilder::compute()` (formal pair sets) →
//! `materialize_summary_arcs()` (arcs at every resolved call site)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{materialize_summary_arcs, run_summary_analysis};
pub use domain::{SummaryOutcome, SummaryPairs, SummaryReport};
pub use infrastructure::{FixedPointSummary, NaiveSummary};
pub use ports::SummaryArcBuilder;
