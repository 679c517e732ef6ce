//! Summary Ports

use crate::features::interprocedural::CallGraphProvider;
use crate::features::pdg::ProcedureDependenceGraph;
use crate::features::summary::domain::SummaryOutcome;
use crate::shared::models::ArcGraph;

/// Computes which formal-ins of each procedure reach which of its formal-outs.
///
/// `pdgs` is indexed by procedure id; `graph` is the linked system graph.
/// Implementations only read; arcs are materialized by the caller.
///
/// # Implementors
/// - `NaiveSummary` (infrastructure/naive.rs)
/// - `FixedPointSummary` (infrastructure/fixed_point.rs)
pub trait SummaryArcBuilder {
    fn compute(
        &self,
        pdgs: &[ProcedureDependenceGraph],
        graph: &ArcGraph,
        calls: &dyn CallGraphProvider,
    ) -> SummaryOutcome;

    fn name(&self) -> &'static str;
}
