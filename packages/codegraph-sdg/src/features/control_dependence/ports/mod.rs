//! Control Dependence Ports

use crate::features::control_dependence::domain::AnalysisGraph;
use crate::shared::models::NodeId;
use std::collections::BTreeSet;

// ═══════════════════════════════════════════════════════════════════════════
// Control Dependence Builder Port
// ═══════════════════════════════════════════════════════════════════════════

/// Computes the control-dependence relation of one analysis graph.
///
/// # Implementors
/// - `PostdominatorTreeControlDependence` (O(V+E) after the tree)
/// - `NaiveControlDependence` (pairwise, oracle for tests and cross-checks)
pub trait ControlDependenceBuilder {
    /// (controller, dependent) pairs
    fn compute(&self, graph: &AnalysisGraph) -> BTreeSet<(NodeId, NodeId)>;

    fn name(&self) -> &'static str;
}
