//! Control Dependence Application Layer
//!
//! Main entry point: `build_control_dependence()`

use crate::config::{ControlDependenceAlgorithm, ControlDependenceConfig};
use crate::errors::{Result, SdgError};
use crate::features::control_dependence::domain::AnalysisGraph;
use crate::features::control_dependence::infrastructure::{
    NaiveControlDependence, PostdominatorTreeControlDependence,
};
use crate::features::control_dependence::ports::ControlDependenceBuilder;
use crate::features::flow_graph::ControlFlowGraph;
use crate::shared::models::{ArcGraph, ArcKind, NodeId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Add the control-dependence arcs of `cfg` to `graph`.
///
/// Arcs touching the canonical exit are never produced (the exit postdominates
/// everything and has no successors). Front-end conditional dependences are
/// added on top. Returns the number of arcs added.
pub fn build_control_dependence(
    cfg: &ControlFlowGraph,
    graph: &mut ArcGraph,
    config: &ControlDependenceConfig,
) -> Result<usize> {
    let analysis = AnalysisGraph::from_cfg(cfg);

    let (primary, oracle): (&dyn ControlDependenceBuilder, &dyn ControlDependenceBuilder) =
        match config.algorithm {
            ControlDependenceAlgorithm::PostdominatorTree => {
                (&PostdominatorTreeControlDependence, &NaiveControlDependence)
            }
            ControlDependenceAlgorithm::Naive => {
                (&NaiveControlDependence, &PostdominatorTreeControlDependence)
            }
        };

    let mut relation = primary.compute(&analysis);
    if config.cross_check {
        let expected = oracle.compute(&analysis);
        if expected != relation {
            let missing: Vec<_> = expected.difference(&relation).take(3).collect();
            let extra: Vec<_> = relation.difference(&expected).take(3).collect();
            return Err(SdgError::malformed(format!(
                "{}: {} and {} control dependence disagree (missing {:?}, extra {:?})",
                cfg.procedure(),
                primary.name(),
                oracle.name(),
                missing,
                extra
            )));
        }
    }

    if config.prune_redundant_jumps {
        prune_redundant_jumps(cfg, &mut relation);
    }

    let mut added = 0;
    for &(controller, dependent) in &relation {
        trace!(%controller, %dependent, "control dependence");
        graph.add_arc(controller, dependent, ArcKind::control());
        added += 1;
    }
    for &(controller, dependent, kind) in cfg.conditional_dependences() {
        if graph.add_arc_unique(controller, dependent, ArcKind::ControlDependence(kind)) {
            added += 1;
        }
    }

    debug!(
        procedure = %cfg.procedure(),
        algorithm = primary.name(),
        arcs = added,
        "control dependence built"
    );
    Ok(added)
}

/// Drop `a → b` when both are pseudo-predicates jumping to the same node
fn prune_redundant_jumps(cfg: &ControlFlowGraph, relation: &mut BTreeSet<(NodeId, NodeId)>) {
    relation.retain(|&(a, b)| {
        if a == b {
            return true;
        }
        match (cfg.pseudo_predicate_target(a), cfg.pseudo_predicate_target(b)) {
            (Some(ta), Some(tb)) => ta != tb,
            _ => true,
        }
    });
}
