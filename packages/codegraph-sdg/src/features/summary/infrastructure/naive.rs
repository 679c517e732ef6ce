//! Single pass over each procedure; no facts flow between procedures.
//!
//! Dependences that only exist through a further call are missed, which makes
//! this a cheap lower bound and an oracle for the fixed point on call-free
//! callees.

use super::reachability::{formal_pairs, Shortcuts};
use crate::features::interprocedural::CallGraphProvider;
use crate::features::pdg::ProcedureDependenceGraph;
use crate::features::summary::domain::SummaryOutcome;
use crate::features::summary::ports::SummaryArcBuilder;
use crate::shared::models::{ArcGraph, ArcKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSummary;

impl SummaryArcBuilder for NaiveSummary {
    fn compute(
        &self,
        pdgs: &[ProcedureDependenceGraph],
        _graph: &ArcGraph,
        _calls: &dyn CallGraphProvider,
    ) -> SummaryOutcome {
        let none = Shortcuts::default();
        let mut outcome = SummaryOutcome {
            converged: true,
            ..SummaryOutcome::default()
        };
        for pdg in pdgs {
            let pairs = formal_pairs(
                pdg,
                pdg.graph(),
                |kind| {
                    matches!(
                        kind,
                        ArcKind::ControlDependence(_) | ArcKind::DataDependence(_) | ArcKind::Structural
                    )
                },
                &none,
            );
            outcome.pairs.insert(pdg.procedure(), pairs);
            outcome.iterations += 1;
        }
        outcome
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}
