use super::{GraphNode, NodeId, NodeKind, ProcedureId};
use crate::errors::{Result, SdgError};

/// Creates nodes with engine-chosen roles and caller-supplied labels.
///
/// The PDG assembler spawns formal, actual, call and return nodes through
/// this seam.
pub trait NodeFactory {
    fn create_node(&mut self, procedure: ProcedureId, kind: NodeKind, label: String) -> NodeId;

    /// Same as [`create_node`](Self::create_node), flagged as synthetic
    fn create_synthetic(&mut self, procedure: ProcedureId, kind: NodeKind, label: String) -> NodeId;
}

/// Owner of every node of a program.
///
/// Ids are dense indices into the arena, allocated in creation order and
/// never reused.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<GraphNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.get_mut(id.index())
    }

    /// Lookup that treats a missing node as a consistency violation
    pub fn node(&self, id: NodeId) -> Result<&GraphNode> {
        self.get(id).ok_or(SdgError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut GraphNode> {
        self.nodes.get_mut(id.index()).ok_or(SdgError::UnknownNode(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    fn push(&mut self, procedure: ProcedureId, kind: NodeKind, label: String, synthetic: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let mut node = GraphNode::new(id, procedure, kind, label);
        node.synthetic = synthetic;
        self.nodes.push(node);
        id
    }
}

impl NodeFactory for NodeArena {
    fn create_node(&mut self, procedure: ProcedureId, kind: NodeKind, label: String) -> NodeId {
        self.push(procedure, kind, label, false)
    }

    fn create_synthetic(&mut self, procedure: ProcedureId, kind: NodeKind, label: String) -> NodeId {
        self.push(procedure, kind, label, true)
    }
}
