mod fixed_point;
mod naive;
mod reachability;

pub use fixed_point::FixedPointSummary;
pub use naive::NaiveSummary;
pub use reachability::{actual_pair, formal_pairs, pdg_of, Shortcuts};
