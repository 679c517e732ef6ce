//! Backward reachability from formal-outs to formal-ins inside one procedure.

use crate::features::pdg::{CallSiteNodes, FormalNodes, ProcedureDependenceGraph};
use crate::shared::models::{ArcGraph, ArcKind, NodeId, ProcedureId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Extra backward edges: actual-out → actual-ins known to reach it
pub type Shortcuts = FxHashMap<NodeId, Vec<NodeId>>;

/// PDG of `procedure`, if one was built
pub fn pdg_of(pdgs: &[ProcedureDependenceGraph], procedure: ProcedureId) -> Option<&ProcedureDependenceGraph> {
    pdgs.get(procedure.index())
        .filter(|pdg| pdg.procedure() == procedure)
}

/// Actual nodes of `site` standing for the callee formals `(formal_in, formal_out)`
pub fn actual_pair(
    site: &CallSiteNodes,
    callee: &FormalNodes,
    formal_in: NodeId,
    formal_out: NodeId,
) -> Option<(NodeId, NodeId)> {
    let actual_in = site.actual_for(callee.kind_of(formal_in)?)?;
    let actual_out = site.actual_for(callee.kind_of(formal_out)?)?;
    Some((actual_in, actual_out))
}

/// Every (formal-in, formal-out) pair of `pdg` connected by a backward path of
/// `follow`-arcs and shortcuts. Paths never leave the procedure.
pub fn formal_pairs(
    pdg: &ProcedureDependenceGraph,
    graph: &ArcGraph,
    follow: impl Fn(&ArcKind) -> bool,
    shortcuts: &Shortcuts,
) -> FxHashSet<(NodeId, NodeId)> {
    let formals = pdg.formals();
    let ins: FxHashSet<NodeId> = formals.ins.iter().copied().collect();
    let mut pairs = FxHashSet::default();

    for formal_out in formals.all_outs() {
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue = VecDeque::from([formal_out]);
        visited.insert(formal_out);

        while let Some(n) = queue.pop_front() {
            if ins.contains(&n) {
                pairs.insert((n, formal_out));
            }
            let sources = graph
                .incoming(n)
                .filter(|&(_, kind)| follow(kind))
                .map(|(source, _)| source)
                .chain(shortcuts.get(&n).into_iter().flatten().copied());
            for source in sources {
                if pdg.contains(source) && visited.insert(source) {
                    queue.push_back(source);
                }
            }
        }
    }
    pairs
}
