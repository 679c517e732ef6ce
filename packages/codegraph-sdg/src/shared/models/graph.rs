//! Arc storage shared by CFG, PDG and SDG.
//!
//! Backed by petgraph's `StableDiGraph`; vertices are looked up by [`NodeId`]
//! through a side index, so callers never hold petgraph indices.

use super::{ArcKind, NodeId};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use rustc_hash::FxHashMap;

/// Directed multigraph over node ids with [`ArcKind`] weights
#[derive(Debug, Clone, Default)]
pub struct ArcGraph {
    graph: StableDiGraph<NodeId, ArcKind>,
    /// NodeId to petgraph NodeIndex mapping
    index: FxHashMap<NodeId, NodeIndex>,
}

impl ArcGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex (no-op when present)
    pub fn add_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&ix) = self.index.get(&id) {
            return ix;
        }
        let ix = self.graph.add_node(id);
        self.index.insert(id, ix);
        ix
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Add an arc, creating missing endpoints
    pub fn add_arc(&mut self, source: NodeId, target: NodeId, kind: ArcKind) -> EdgeIndex {
        let s = self.add_node(source);
        let t = self.add_node(target);
        self.graph.add_edge(s, t, kind)
    }

    /// Add an arc unless an identical one exists; returns whether it was added
    pub fn add_arc_unique(&mut self, source: NodeId, target: NodeId, kind: ArcKind) -> bool {
        if self.has_arc(source, target, &kind) {
            return false;
        }
        self.add_arc(source, target, kind);
        true
    }

    pub fn has_arc(&self, source: NodeId, target: NodeId, kind: &ArcKind) -> bool {
        self.has_arc_where(source, target, |k| k == kind)
    }

    pub fn has_arc_where(&self, source: NodeId, target: NodeId, pred: impl Fn(&ArcKind) -> bool) -> bool {
        self.outgoing(source).any(|(t, k)| t == target && pred(k))
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &ArcKind)> + '_ {
        self.neighbors(id, Direction::Outgoing)
    }

    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &ArcKind)> + '_ {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: NodeId, dir: Direction) -> impl Iterator<Item = (NodeId, &ArcKind)> + '_ {
        self.index.get(&id).into_iter().flat_map(move |&ix| {
            self.graph.edges_directed(ix, dir).map(move |e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (self.graph[other], e.weight())
            })
        })
    }

    /// All arcs as (source, target, kind)
    pub fn arcs(&self) -> impl Iterator<Item = (NodeId, NodeId, &ArcKind)> + '_ {
        self.graph
            .edge_references()
            .map(move |e| (self.graph[e.source()], self.graph[e.target()], e.weight()))
    }

    /// Copy every vertex and arc of `other` into `self`
    pub fn extend_from(&mut self, other: &ArcGraph) {
        for id in other.nodes() {
            self.add_node(id);
        }
        for (s, t, kind) in other.arcs() {
            self.add_arc(s, t, kind.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query_arcs() {
        let mut g = ArcGraph::new();
        g.add_arc(NodeId(1), NodeId(2), ArcKind::control());
        g.add_arc(NodeId(1), NodeId(2), ArcKind::Structural);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.arc_count(), 2);
        assert!(g.has_arc(NodeId(1), NodeId(2), &ArcKind::Structural));
        assert!(!g.has_arc(NodeId(2), NodeId(1), &ArcKind::Structural));
        assert_eq!(g.incoming(NodeId(2)).count(), 2);
        assert_eq!(g.outgoing(NodeId(3)).count(), 0);
    }

    #[test]
    fn test_add_arc_unique_deduplicates() {
        let mut g = ArcGraph::new();
        assert!(g.add_arc_unique(NodeId(1), NodeId(2), ArcKind::Summary));
        assert!(!g.add_arc_unique(NodeId(1), NodeId(2), ArcKind::Summary));
        assert_eq!(g.arc_count(), 1);
    }

    #[test]
    fn test_extend_from_copies_isolated_nodes_and_parallel_arcs() {
        let mut other = ArcGraph::new();
        other.add_node(NodeId(9));
        other.add_arc(NodeId(1), NodeId(2), ArcKind::executable_flow());
        other.add_arc(NodeId(1), NodeId(2), ArcKind::Structural);

        let mut g = ArcGraph::new();
        g.add_arc(NodeId(2), NodeId(3), ArcKind::Summary);
        g.extend_from(&other);

        assert!(g.contains(NodeId(9)));
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.arcs().count(), 3);
        assert!(g.has_arc(NodeId(1), NodeId(2), &ArcKind::Structural));
    }
}
