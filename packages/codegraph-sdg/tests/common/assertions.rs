//! Slice assertions with readable failure messages

use codegraph_sdg::features::slicing::Slice;
use codegraph_sdg::{ArcKind, NodeId, SystemDependenceGraph};
use std::collections::BTreeSet;

fn label(sdg: &SystemDependenceGraph, id: NodeId) -> String {
    sdg.node(id)
        .map(|n| format!("{} '{}'", id, n.label))
        .unwrap_or_else(|_| id.to_string())
}

fn members(sdg: &SystemDependenceGraph, slice: &Slice) -> Vec<String> {
    slice.iter().map(|n| label(sdg, n)).collect()
}

pub fn assert_in_slice(sdg: &SystemDependenceGraph, slice: &Slice, nodes: &[NodeId]) {
    for &n in nodes {
        assert!(
            slice.contains(n),
            "expected {} in slice of {}, got {:?}",
            label(sdg, n),
            slice.criterion(),
            members(sdg, slice)
        );
    }
}

pub fn assert_not_in_slice(sdg: &SystemDependenceGraph, slice: &Slice, nodes: &[NodeId]) {
    for &n in nodes {
        assert!(
            !slice.contains(n),
            "expected {} outside slice of {}, got {:?}",
            label(sdg, n),
            slice.criterion(),
            members(sdg, slice)
        );
    }
}

/// Every member but the criterion reaches the slice along an arc the
/// two-phase walk follows.
///
/// Members first reached while ascending need an intraprocedural or input arc
/// into the ascending part; the rest need an intraprocedural or output arc
/// into any member.
pub fn assert_closed(sdg: &SystemDependenceGraph, slice: &Slice) {
    let graph = sdg.graph().expect("built");
    let include_control = sdg.config().slicing_config().include_control;
    let intraprocedural = |kind: &ArcKind| match kind {
        ArcKind::ControlDependence(_) => include_control,
        ArcKind::DataDependence(_) | ArcKind::Structural | ArcKind::Summary => true,
        _ => false,
    };

    let mut ascended = BTreeSet::from([slice.criterion().node]);
    loop {
        let before = ascended.len();
        for n in slice.iter() {
            let reached = graph.outgoing(n).any(|(target, kind)| {
                ascended.contains(&target)
                    && (intraprocedural(kind) || kind.is_interprocedural_input())
            });
            if reached {
                ascended.insert(n);
            }
        }
        if ascended.len() == before {
            break;
        }
    }

    for n in slice.iter().filter(|n| !ascended.contains(n)) {
        let descended = graph.outgoing(n).any(|(target, kind)| {
            slice.contains(target) && (intraprocedural(kind) || kind.is_interprocedural_output())
        });
        assert!(
            descended,
            "{} is in the slice of {} without an arc the walk follows",
            label(sdg, n),
            slice.criterion()
        );
    }
}

/// Every interprocedural arc is exactly one of input / output
pub fn assert_interprocedural_exclusive(sdg: &SystemDependenceGraph) {
    let graph = sdg.graph().expect("built");
    for (source, target, kind) in graph.arcs().filter(|(_, _, k)| k.is_interprocedural()) {
        assert!(
            kind.is_interprocedural_input() != kind.is_interprocedural_output(),
            "{} → {} ({}) is not exactly one of input/output",
            source,
            target,
            kind.as_str()
        );
    }
}

pub fn summary_arc_count(sdg: &SystemDependenceGraph) -> usize {
    sdg.graph()
        .expect("built")
        .arcs()
        .filter(|(_, _, k)| matches!(k, ArcKind::Summary))
        .count()
}
