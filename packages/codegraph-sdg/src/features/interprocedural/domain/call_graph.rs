//! Call graph over procedures (caller → callee), built from resolved call sites.

use crate::features::interprocedural::ports::CallGraphProvider;
use crate::features::pdg::ProcedureDependenceGraph;
use crate::shared::models::ProcedureId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: DiGraph<ProcedureId, ()>,
    index: FxHashMap<ProcedureId, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pdgs(pdgs: &[ProcedureDependenceGraph]) -> Self {
        let mut cg = CallGraph::new();
        for pdg in pdgs {
            cg.add_procedure(pdg.procedure());
        }
        for pdg in pdgs {
            for site in pdg.call_sites() {
                if let Some(callee) = site.callee {
                    cg.add_call(pdg.procedure(), callee);
                }
            }
        }
        cg
    }

    pub fn add_procedure(&mut self, procedure: ProcedureId) -> NodeIndex {
        if let Some(&ix) = self.index.get(&procedure) {
            return ix;
        }
        let ix = self.graph.add_node(procedure);
        self.index.insert(procedure, ix);
        ix
    }

    /// Add caller → callee once
    pub fn add_call(&mut self, caller: ProcedureId, callee: ProcedureId) {
        let a = self.add_procedure(caller);
        let b = self.add_procedure(callee);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, ());
        }
    }

    pub fn call_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Procedure calls itself directly or through a cycle
    pub fn is_recursive(&self, procedure: ProcedureId) -> bool {
        let Some(&ix) = self.index.get(&procedure) else {
            return false;
        };
        if self.graph.find_edge(ix, ix).is_some() {
            return true;
        }
        tarjan_scc(&self.graph)
            .iter()
            .any(|scc| scc.len() > 1 && scc.contains(&ix))
    }

    fn neighbors(&self, procedure: ProcedureId, dir: Direction) -> Vec<ProcedureId> {
        let Some(&ix) = self.index.get(&procedure) else {
            return Vec::new();
        };
        let mut out: Vec<ProcedureId> = self
            .graph
            .neighbors_directed(ix, dir)
            .map(|n| self.graph[n])
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

impl CallGraphProvider for CallGraph {
    fn callees(&self, procedure: ProcedureId) -> Vec<ProcedureId> {
        self.neighbors(procedure, Direction::Outgoing)
    }

    fn callers(&self, procedure: ProcedureId) -> Vec<ProcedureId> {
        self.neighbors(procedure, Direction::Incoming)
    }

    fn procedures(&self) -> Vec<ProcedureId> {
        let mut procs: Vec<ProcedureId> = self.graph.node_weights().copied().collect();
        procs.sort_unstable();
        procs
    }

    fn bottom_up_order(&self) -> Vec<ProcedureId> {
        // tarjan_scc yields SCCs in reverse topological order: callees first
        tarjan_scc(&self.graph)
            .into_iter()
            .flat_map(|scc| {
                let mut members: Vec<ProcedureId> = scc.into_iter().map(|ix| self.graph[ix]).collect();
                members.sort_unstable();
                members
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u32) -> ProcedureId {
        ProcedureId(i)
    }

    #[test]
    fn test_callers_and_callees() {
        let mut cg = CallGraph::new();
        cg.add_call(p(0), p(1));
        cg.add_call(p(0), p(1));
        cg.add_call(p(0), p(2));
        cg.add_call(p(2), p(1));

        assert_eq!(cg.callees(p(0)), vec![p(1), p(2)]);
        assert_eq!(cg.callers(p(1)), vec![p(0), p(2)]);
        assert_eq!(cg.call_count(), 3);
    }

    #[test]
    fn test_bottom_up_order_puts_callees_first() {
        let mut cg = CallGraph::new();
        cg.add_call(p(0), p(1));
        cg.add_call(p(1), p(2));
        let order = cg.bottom_up_order();
        let pos = |x| order.iter().position(|&q| q == x).unwrap();
        assert!(pos(p(2)) < pos(p(1)));
        assert!(pos(p(1)) < pos(p(0)));
    }

    #[test]
    fn test_recursion_detection() {
        let mut cg = CallGraph::new();
        cg.add_call(p(0), p(1));
        cg.add_call(p(1), p(0));
        cg.add_call(p(2), p(2));
        cg.add_procedure(p(3));
        assert!(cg.is_recursive(p(0)));
        assert!(cg.is_recursive(p(2)));
        assert!(!cg.is_recursive(p(3)));
    }
}
