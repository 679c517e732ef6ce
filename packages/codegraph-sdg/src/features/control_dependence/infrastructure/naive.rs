//! Naive pairwise control dependence.
//!
//! O(V³) and worse; kept as the oracle the tree builder is checked against.

use crate::features::control_dependence::domain::AnalysisGraph;
use crate::features::control_dependence::ports::ControlDependenceBuilder;
use crate::shared::models::NodeId;
use std::collections::BTreeSet;

/// `b` lies on every path from `a` to the exit (reflexive).
///
/// Depth-first walk from `a` that refuses to enter `b`; if the exit is still
/// reachable, `b` does not postdominate `a`.
pub fn postdominates(graph: &AnalysisGraph, b: usize, a: usize) -> bool {
    if a == b || b == graph.exit() {
        return true;
    }
    let mut visited = vec![false; graph.len()];
    let mut stack = vec![a];
    visited[a] = true;
    while let Some(n) = stack.pop() {
        if n == graph.exit() {
            return false;
        }
        for &s in graph.flow_successors(n) {
            if s != b && !visited[s] {
                visited[s] = true;
                stack.push(s);
            }
        }
    }
    true
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveControlDependence;

impl ControlDependenceBuilder for NaiveControlDependence {
    fn compute(&self, graph: &AnalysisGraph) -> BTreeSet<(NodeId, NodeId)> {
        let mut relation = BTreeSet::new();
        for a in 0..graph.len() {
            let succs = graph.dependence_successors(a);
            if succs.len() < 2 {
                continue;
            }
            for b in 0..graph.len() {
                let count = succs.iter().filter(|&&s| postdominates(graph, b, s)).count();
                if count > 0 && count < succs.len() {
                    relation.insert((graph.node(a), graph.node(b)));
                }
            }
        }
        relation
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}
