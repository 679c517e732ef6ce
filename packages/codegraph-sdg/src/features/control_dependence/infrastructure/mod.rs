mod naive;
mod postdominator_tree;

pub use naive::{postdominates, NaiveControlDependence};
pub use postdominator_tree::{PostdominatorTree, PostdominatorTreeControlDependence};
