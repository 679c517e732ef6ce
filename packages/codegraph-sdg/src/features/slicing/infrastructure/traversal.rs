/*
 * Two-phase backward traversal (Horwitz-Reps-Binkley)
 *
 * Phase 1 (ascend): never descends into callees. Follows intraprocedural
 *   dependences, summary arcs, and call / parameter-in arcs up to callers.
 * Phase 2 (descend): restarts from everything phase 1 found and follows
 *   parameter-out / return arcs down into callees, never back up.
 *
 * Summary arcs stand in for the callee while ascending, so neither phase
 * re-walks a whole procedure through an unrelated call site.
 */

use crate::config::SlicingConfig;
use crate::features::slicing::domain::SlicingCriterion;
use crate::shared::models::{ArcGraph, ArcKind, NodeId};
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ascend,
    Descend,
}

impl Phase {
    fn follows(self, kind: &ArcKind, config: &SlicingConfig) -> bool {
        match kind {
            ArcKind::ControlDependence(_) => config.include_control,
            ArcKind::DataDependence(_) | ArcKind::Structural | ArcKind::Summary => true,
            k if k.is_interprocedural_input() => self == Phase::Ascend,
            k if k.is_interprocedural_output() => self == Phase::Descend,
            _ => false,
        }
    }
}

/// Run both phases; `expand` decides whether a reached node's own
/// dependences are explored (the node is included either way).
pub(super) fn two_phase(
    graph: &ArcGraph,
    criterion: &SlicingCriterion,
    config: &SlicingConfig,
    expand: impl Fn(NodeId, &BTreeSet<NodeId>) -> bool,
) -> BTreeSet<NodeId> {
    let mut included = BTreeSet::new();

    let seeds = vec![(criterion.node, 0)];
    let reached = walk(graph, criterion, config, Phase::Ascend, seeds, &mut included, &expand);
    walk(graph, criterion, config, Phase::Descend, reached, &mut included, &expand);

    included
}

/// Breadth-first so every node is expanded at its smallest depth.
/// Returns the nodes visited with their depths.
fn walk(
    graph: &ArcGraph,
    criterion: &SlicingCriterion,
    config: &SlicingConfig,
    phase: Phase,
    seeds: Vec<(NodeId, usize)>,
    included: &mut BTreeSet<NodeId>,
    expand: &impl Fn(NodeId, &BTreeSet<NodeId>) -> bool,
) -> Vec<(NodeId, usize)> {
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut order = Vec::new();
    let mut frontier: VecDeque<(NodeId, usize)> = seeds.into();

    while let Some((n, depth)) = frontier.pop_front() {
        if !visited.insert(n) {
            continue;
        }
        included.insert(n);
        order.push((n, depth));

        if !expand(n, &*included) {
            trace!(node = %n, "expansion pruned");
            continue;
        }
        if config.max_depth.is_some_and(|max| depth >= max) {
            continue;
        }

        for (source, kind) in graph.incoming(n) {
            if !phase.follows(kind, config) || visited.contains(&source) {
                continue;
            }
            if n == criterion.node {
                if let (Some(wanted), Some(variable)) = (&criterion.variable, kind.variable()) {
                    if wanted != variable {
                        continue;
                    }
                }
            }
            frontier.push_back((source, depth + 1));
        }
    }
    order
}
