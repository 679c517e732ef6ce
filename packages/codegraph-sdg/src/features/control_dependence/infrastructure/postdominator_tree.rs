/*
 * Postdominator Tree
 *
 * Immediate postdominators by the iterative algorithm of Cooper, Harvey and
 * Kennedy ("A Simple, Fast Dominance Algorithm") run on the reverse CFG:
 * - nodes processed in reverse postorder of the exit-rooted traversal
 * - ipdom(n) = intersect of ipdom over already-processed CFG successors
 * - repeat until no change
 *
 * Control dependence from the tree: for a node `a` with successors S, the
 * nodes on the tree path from each s in S up to (excluding) the lowest common
 * postdominator of S are exactly the nodes postdominating some but not all
 * of S.
 */

use crate::features::control_dependence::domain::AnalysisGraph;
use crate::features::control_dependence::ports::ControlDependenceBuilder;
use crate::shared::models::NodeId;
use std::collections::BTreeSet;

const UNDEFINED: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct PostdominatorTree {
    /// ipdom per dense index; the exit maps to itself
    ipdom: Vec<usize>,
    /// Position in reverse postorder of the exit-rooted traversal
    rpo_number: Vec<usize>,
    depth: Vec<usize>,
    exit: usize,
}

impl PostdominatorTree {
    pub fn compute(graph: &AnalysisGraph) -> Self {
        let n = graph.len();
        let exit = graph.exit();
        let order = reverse_postorder(graph);

        let mut rpo_number = vec![UNDEFINED; n];
        for (i, &node) in order.iter().enumerate() {
            rpo_number[node] = i;
        }

        let mut ipdom = vec![UNDEFINED; n];
        ipdom[exit] = exit;

        let mut changed = true;
        while changed {
            changed = false;
            for &node in order.iter().skip(1) {
                let mut new_ipdom = UNDEFINED;
                for &succ in graph.flow_successors(node) {
                    if ipdom[succ] == UNDEFINED {
                        continue;
                    }
                    new_ipdom = if new_ipdom == UNDEFINED {
                        succ
                    } else {
                        intersect(&ipdom, &rpo_number, succ, new_ipdom)
                    };
                }
                if new_ipdom != UNDEFINED && ipdom[node] != new_ipdom {
                    ipdom[node] = new_ipdom;
                    changed = true;
                }
            }
        }

        // Order guarantees a parent precedes its children
        let mut depth = vec![0; n];
        for &node in order.iter().skip(1) {
            depth[node] = depth[ipdom[node]] + 1;
        }

        PostdominatorTree {
            ipdom,
            rpo_number,
            depth,
            exit,
        }
    }

    /// Immediate postdominator; `None` for the exit
    pub fn immediate(&self, node: usize) -> Option<usize> {
        if node == self.exit {
            None
        } else {
            Some(self.ipdom[node])
        }
    }

    /// `b` lies on every path from `a` to the exit (reflexive)
    pub fn postdominates(&self, b: usize, a: usize) -> bool {
        let mut cur = a;
        loop {
            if cur == b {
                return true;
            }
            if self.depth[cur] <= self.depth[b] {
                return false;
            }
            cur = self.ipdom[cur];
        }
    }

    /// Lowest common postdominator
    pub fn lca(&self, mut a: usize, mut b: usize) -> usize {
        while self.depth[a] > self.depth[b] {
            a = self.ipdom[a];
        }
        while self.depth[b] > self.depth[a] {
            b = self.ipdom[b];
        }
        while a != b {
            a = self.ipdom[a];
            b = self.ipdom[b];
        }
        a
    }

    pub fn rpo_number(&self, node: usize) -> usize {
        self.rpo_number[node]
    }
}

fn intersect(ipdom: &[usize], rpo_number: &[usize], mut a: usize, mut b: usize) -> usize {
    while a != b {
        while rpo_number[a] > rpo_number[b] {
            a = ipdom[a];
        }
        while rpo_number[b] > rpo_number[a] {
            b = ipdom[b];
        }
    }
    a
}

/// Reverse postorder of the traversal from the exit along reversed flow arcs
fn reverse_postorder(graph: &AnalysisGraph) -> Vec<usize> {
    let n = graph.len();
    let mut visited = vec![false; n];
    let mut postorder = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = vec![(graph.exit(), 0)];
    visited[graph.exit()] = true;

    while let Some(top) = stack.last_mut() {
        let node = top.0;
        let preds = graph.flow_predecessors(node);
        if top.1 < preds.len() {
            let p = preds[top.1];
            top.1 += 1;
            if !visited[p] {
                visited[p] = true;
                stack.push((p, 0));
            }
        } else {
            postorder.push(node);
            stack.pop();
        }
    }
    postorder.reverse();
    postorder
}

/// Production control-dependence builder
#[derive(Debug, Clone, Copy, Default)]
pub struct PostdominatorTreeControlDependence;

impl ControlDependenceBuilder for PostdominatorTreeControlDependence {
    fn compute(&self, graph: &AnalysisGraph) -> BTreeSet<(NodeId, NodeId)> {
        let tree = PostdominatorTree::compute(graph);
        let mut relation = BTreeSet::new();

        for a in 0..graph.len() {
            let succs = graph.dependence_successors(a);
            if succs.len() < 2 {
                continue;
            }
            let Some(common) = succs.iter().copied().reduce(|x, y| tree.lca(x, y)) else {
                continue;
            };
            for &s in succs {
                let mut u = s;
                while u != common {
                    relation.insert((graph.node(a), graph.node(u)));
                    match tree.immediate(u) {
                        Some(parent) => u = parent,
                        None => break,
                    }
                }
            }
        }
        relation
    }

    fn name(&self) -> &'static str {
        "postdominator-tree"
    }
}
