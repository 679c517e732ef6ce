//! Dense view of a CFG prepared for postdominance.
//!
//! Postdominance follows executable arcs only. Two kinds of temporary arcs are
//! layered on top and never reach the CFG itself:
//! - root → exit, so top-level statements depend on the entry
//! - head → exit for every strongly connected component that cannot reach the
//!   exit and has no way out (an infinite loop or a dead end), so the
//!   postdominance relation is total
//!
//! A single arc per component, leaving from the node first reached from the
//! root, keeps the loop body postdominated by its head: statements inside a
//! `while (true)` still depend on the loop and on whatever encloses it.
//!
//! Dependence successors, the sets control dependence is defined over, keep
//! non-executable arcs: a pseudo-predicate's virtual fallthrough is what gives
//! the statements after a jump their dependence on it.

use crate::features::flow_graph::ControlFlowGraph;
use crate::shared::models::{ArcKind, NodeId};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AnalysisGraph {
    nodes: Vec<NodeId>,
    index: FxHashMap<NodeId, usize>,
    flow: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
    dependence: Vec<Vec<usize>>,
    root: usize,
    exit: usize,
}

impl AnalysisGraph {
    pub fn from_cfg(cfg: &ControlFlowGraph) -> Self {
        let nodes = cfg.nodes();
        let index: FxHashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let n = nodes.len();
        let root = index[&cfg.root()];
        let exit = index[&cfg.exit()];

        let mut flow = vec![Vec::new(); n];
        let mut dependence = vec![Vec::new(); n];
        for (s, t, kind) in cfg.graph().arcs() {
            let (s, t) = (index[&s], index[&t]);
            if let ArcKind::ControlFlow { executable } = kind {
                dependence[s].push(t);
                if *executable {
                    flow[s].push(t);
                }
            }
        }
        flow[root].push(exit);
        dependence[root].push(exit);

        let trapped = Self::trapped_heads(&flow, root, exit);
        if !trapped.is_empty() {
            warn!(
                procedure = %cfg.procedure(),
                components = trapped.len(),
                "loops cannot reach the exit; their heads are linked to it for postdominance"
            );
        }
        for head in trapped {
            flow[head].push(exit);
            dependence[head].push(exit);
        }

        for succs in flow.iter_mut().chain(dependence.iter_mut()) {
            succs.sort_unstable();
            succs.dedup();
        }
        let mut reverse = vec![Vec::new(); n];
        for (s, succs) in flow.iter().enumerate() {
            for &t in succs {
                reverse[t].push(s);
            }
        }

        AnalysisGraph {
            nodes,
            index,
            flow,
            reverse,
            dependence,
            root,
            exit,
        }
    }

    /// One head per component with no path to `exit` and no arc leaving it
    fn trapped_heads(flow: &[Vec<usize>], root: usize, exit: usize) -> Vec<usize> {
        let reaches_exit = Self::reaching(flow, exit);
        if reaches_exit.iter().all(|&r| r) {
            return Vec::new();
        }

        let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(flow.len(), 0);
        for _ in 0..flow.len() {
            graph.add_node(());
        }
        for (s, succs) in flow.iter().enumerate() {
            for &t in succs {
                graph.add_edge(NodeIndex::new(s), NodeIndex::new(t), ());
            }
        }

        let discovered = Self::discovery_order(flow, root);
        let mut component = vec![usize::MAX; flow.len()];
        let components = tarjan_scc(&graph);
        for (c, members) in components.iter().enumerate() {
            for m in members {
                component[m.index()] = c;
            }
        }

        let mut heads = Vec::new();
        for (c, members) in components.iter().enumerate() {
            let members: Vec<usize> = members.iter().map(|m| m.index()).collect();
            if members.iter().any(|&m| reaches_exit[m]) {
                continue;
            }
            let closed = members
                .iter()
                .all(|&m| flow[m].iter().all(|&t| component[t] == c));
            if !closed {
                continue;
            }
            if let Some(head) = members.into_iter().min_by_key(|&m| (discovered[m], m)) {
                heads.push(head);
            }
        }
        heads.sort_unstable();
        heads
    }

    /// Breadth-first discovery rank from `root`; unreachable nodes rank last
    fn discovery_order(flow: &[Vec<usize>], root: usize) -> Vec<usize> {
        let mut rank = vec![usize::MAX; flow.len()];
        let mut next = 0;
        let mut queue = VecDeque::from([root]);
        rank[root] = next;
        while let Some(n) = queue.pop_front() {
            for &s in &flow[n] {
                if rank[s] == usize::MAX {
                    next += 1;
                    rank[s] = next;
                    queue.push_back(s);
                }
            }
        }
        rank
    }

    /// Nodes that reach `exit` along `flow`
    fn reaching(flow: &[Vec<usize>], exit: usize) -> Vec<bool> {
        let mut reverse = vec![Vec::new(); flow.len()];
        for (s, succs) in flow.iter().enumerate() {
            for &t in succs {
                reverse[t].push(s);
            }
        }
        let mut seen = vec![false; flow.len()];
        let mut queue = VecDeque::from([exit]);
        seen[exit] = true;
        while let Some(n) = queue.pop_front() {
            for &p in &reverse[n] {
                if !seen[p] {
                    seen[p] = true;
                    queue.push_back(p);
                }
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, i: usize) -> NodeId {
        self.nodes[i]
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn exit(&self) -> usize {
        self.exit
    }

    /// Successors for postdominance
    pub fn flow_successors(&self, i: usize) -> &[usize] {
        &self.flow[i]
    }

    pub fn flow_predecessors(&self, i: usize) -> &[usize] {
        &self.reverse[i]
    }

    /// Distinct successors control dependence is defined over
    pub fn dependence_successors(&self, i: usize) -> &[usize] {
        &self.dependence[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::ProgramBuilder;
    use crate::shared::models::Signature;

    fn links_to_exit(graph: &AnalysisGraph, id: NodeId) -> bool {
        let i = graph.index_of(id).unwrap();
        graph.flow_successors(i).contains(&graph.exit())
    }

    /// if (c) { while (true) { a } } n
    #[test]
    fn test_only_the_loop_head_is_linked_to_the_exit() {
        let mut program = ProgramBuilder::new();
        let mut f = program.procedure("f", Signature::new());
        let c = f.statement("if c", []);
        let head = f.statement("while true", []);
        let a = f.statement("a", []);
        let n = f.statement("n", []);
        let (entry, exit) = (f.entry(), f.exit());
        f.chain(&[entry, c, head, a, head]).chain(&[c, n, exit]);
        let id = f.finish().unwrap();
        let program = program.build();
        let graph = AnalysisGraph::from_cfg(&program.procedure(id).unwrap().cfg);

        assert!(links_to_exit(&graph, head));
        assert!(!links_to_exit(&graph, a));
        assert!(!links_to_exit(&graph, c));
        let h = graph.index_of(head).unwrap();
        assert!(graph.dependence_successors(h).contains(&graph.exit()));
    }

    /// while (c) { b } while (true) { d }
    #[test]
    fn test_loop_draining_into_a_trap_is_not_linked() {
        let mut program = ProgramBuilder::new();
        let mut f = program.procedure("f", Signature::new());
        let first = f.statement("while c", []);
        let b = f.statement("b", []);
        let second = f.statement("while true", []);
        let d = f.statement("d", []);
        let (entry, exit) = (f.entry(), f.exit());
        f.chain(&[entry, first, b, first])
            .chain(&[first, second, d, second])
            .flow(entry, exit);
        let id = f.finish().unwrap();
        let program = program.build();
        let graph = AnalysisGraph::from_cfg(&program.procedure(id).unwrap().cfg);

        assert!(links_to_exit(&graph, second));
        for n in [first, b, d] {
            assert!(!links_to_exit(&graph, n));
        }
    }

    #[test]
    fn test_dead_end_is_linked_to_the_exit() {
        let mut program = ProgramBuilder::new();
        let mut f = program.procedure("f", Signature::new());
        let c = f.statement("if c", []);
        let halt = f.statement("halt", []);
        let (entry, exit) = (f.entry(), f.exit());
        f.chain(&[entry, c, exit]).flow(c, halt);
        let id = f.finish().unwrap();
        let program = program.build();
        let graph = AnalysisGraph::from_cfg(&program.procedure(id).unwrap().cfg);

        assert!(links_to_exit(&graph, halt));
    }
}
