/*
 * Call-graph fixed point
 *
 * Worklist of procedures, seeded callees-first. Visiting a procedure
 * recomputes its formal pairs with every callee's current pairs available as
 * actual-in → actual-out shortcuts. When the set grows, the callers go back
 * on the worklist.
 *
 * Pair sets only grow and are bounded by |formal-in| × |formal-out|, so the
 * loop terminates, recursion included. `max_iterations` caps the number of
 * visits; hitting it leaves an under-approximation.
 */

use super::reachability::{actual_pair, formal_pairs, pdg_of, Shortcuts};
use crate::features::interprocedural::CallGraphProvider;
use crate::features::pdg::ProcedureDependenceGraph;
use crate::features::summary::domain::{SummaryOutcome, SummaryPairs};
use crate::features::summary::ports::SummaryArcBuilder;
use crate::shared::models::{ArcGraph, ArcKind, ProcedureId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct FixedPointSummary {
    pub max_iterations: usize,
}

impl FixedPointSummary {
    pub fn new(max_iterations: usize) -> Self {
        FixedPointSummary { max_iterations }
    }
}

impl SummaryArcBuilder for FixedPointSummary {
    fn compute(
        &self,
        pdgs: &[ProcedureDependenceGraph],
        graph: &ArcGraph,
        calls: &dyn CallGraphProvider,
    ) -> SummaryOutcome {
        let mut pairs = SummaryPairs::default();
        let mut worklist: VecDeque<ProcedureId> = calls.bottom_up_order().into_iter().collect();
        let mut queued: FxHashSet<ProcedureId> = worklist.iter().copied().collect();
        let mut iterations = 0;
        let mut converged = true;

        while let Some(procedure) = worklist.pop_front() {
            queued.remove(&procedure);
            if iterations >= self.max_iterations {
                warn!(
                    max_iterations = self.max_iterations,
                    pending = worklist.len() + 1,
                    "summary fixed point stopped before convergence"
                );
                converged = false;
                break;
            }
            iterations += 1;

            let Some(pdg) = pdg_of(pdgs, procedure) else {
                debug!(%procedure, "no dependence graph; skipped");
                continue;
            };
            let shortcuts = callee_shortcuts(pdg, pdgs, &pairs);
            let found = formal_pairs(pdg, graph, ArcKind::is_intraprocedural_dependence, &shortcuts);

            let facts = pairs.entry(procedure).or_default();
            let before = facts.len();
            facts.extend(found);
            let grew = facts.len() > before;
            debug!(%procedure, pairs = facts.len(), grew, "summary pass");

            if grew {
                for caller in calls.callers(procedure) {
                    if queued.insert(caller) {
                        worklist.push_back(caller);
                    }
                }
            }
        }

        SummaryOutcome {
            pairs,
            iterations,
            converged,
        }
    }

    fn name(&self) -> &'static str {
        "fixed_point"
    }
}

/// Current callee facts, mapped onto the call sites of `pdg`
fn callee_shortcuts(
    pdg: &ProcedureDependenceGraph,
    pdgs: &[ProcedureDependenceGraph],
    pairs: &SummaryPairs,
) -> Shortcuts {
    let mut shortcuts = Shortcuts::default();
    for site in pdg.call_sites() {
        let Some(callee) = site.callee.and_then(|c| pdg_of(pdgs, c)) else {
            continue;
        };
        let Some(facts) = pairs.get(&callee.procedure()) else {
            continue;
        };
        for &(formal_in, formal_out) in facts {
            if let Some((actual_in, actual_out)) = actual_pair(site, callee.formals(), formal_in, formal_out) {
                shortcuts.entry(actual_out).or_default().push(actual_in);
            }
        }
    }
    shortcuts
}
