//! Summary Application Layer
//!
//! Main entry point: `run_summary_analysis()`

use crate::config::{SummaryAlgorithm, SummaryConfig};
use crate::features::interprocedural::CallGraphProvider;
use crate::features::pdg::ProcedureDependenceGraph;
use crate::features::summary::domain::{SummaryPairs, SummaryReport};
use crate::features::summary::infrastructure::{actual_pair, pdg_of, FixedPointSummary, NaiveSummary};
use crate::features::summary::ports::SummaryArcBuilder;
use crate::shared::models::{ArcGraph, ArcKind};
use tracing::info;

/// Compute summary pairs with the configured algorithm and add the matching
/// Summary arcs to `graph`.
///
/// Arcs already present are not duplicated, so a second run after
/// convergence adds nothing.
pub fn run_summary_analysis(
    pdgs: &[ProcedureDependenceGraph],
    graph: &mut ArcGraph,
    calls: &dyn CallGraphProvider,
    config: &SummaryConfig,
) -> SummaryReport {
    let builder: Box<dyn SummaryArcBuilder> = match config.algorithm {
        SummaryAlgorithm::Naive => Box::new(NaiveSummary),
        SummaryAlgorithm::FixedPoint => Box::new(FixedPointSummary::new(config.max_iterations)),
    };

    let outcome = builder.compute(pdgs, graph, calls);
    let arcs_added = materialize_summary_arcs(pdgs, &outcome.pairs, graph);

    let report = SummaryReport {
        algorithm: config.algorithm,
        iterations: outcome.iterations,
        converged: outcome.converged,
        pairs: outcome.pair_count(),
        arcs_added,
    };
    info!(
        algorithm = builder.name(),
        iterations = report.iterations,
        converged = report.converged,
        pairs = report.pairs,
        arcs_added,
        "summary analysis finished"
    );
    report
}

/// One Summary arc per callee pair at every resolved call site.
/// Returns the number of arcs that were new.
pub fn materialize_summary_arcs(
    pdgs: &[ProcedureDependenceGraph],
    pairs: &SummaryPairs,
    graph: &mut ArcGraph,
) -> usize {
    let mut added = 0;
    for pdg in pdgs {
        for site in pdg.call_sites() {
            let Some(callee) = site.callee.and_then(|c| pdg_of(pdgs, c)) else {
                continue;
            };
            let Some(facts) = pairs.get(&callee.procedure()) else {
                continue;
            };
            for &(formal_in, formal_out) in facts {
                if let Some((actual_in, actual_out)) = actual_pair(site, callee.formals(), formal_in, formal_out) {
                    if graph.add_arc_unique(actual_in, actual_out, ArcKind::Summary) {
                        added += 1;
                    }
                }
            }
        }
    }
    added
}
