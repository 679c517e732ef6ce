//! CFG domain model

use crate::errors::{Result, SdgError};
use crate::shared::models::{
    ArcGraph, ArcKind, ControlDependenceKind, NodeArena, NodeId, ProcedureId, Signature,
};

/// Control flow graph of one procedure.
///
/// Exactly one root (the entry) and one canonical exit; only `ControlFlow`
/// arcs, executable or not. Read-only once built.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    procedure: ProcedureId,
    root: NodeId,
    exit: NodeId,
    graph: ArcGraph,
    built: bool,
    /// Conditional control dependences supplied by the front end (exception constructs)
    conditional: Vec<(NodeId, NodeId, ControlDependenceKind)>,
}

impl ControlFlowGraph {
    pub fn new(procedure: ProcedureId, root: NodeId, exit: NodeId) -> Self {
        let mut graph = ArcGraph::new();
        graph.add_node(root);
        graph.add_node(exit);
        ControlFlowGraph {
            procedure,
            root,
            exit,
            graph,
            built: false,
            conditional: Vec::new(),
        }
    }

    pub fn add_node(&mut self, id: NodeId) {
        debug_assert!(!self.built, "CFG is frozen");
        self.graph.add_node(id);
    }

    pub fn add_flow(&mut self, source: NodeId, target: NodeId, executable: bool) {
        debug_assert!(!self.built, "CFG is frozen");
        self.graph
            .add_arc(source, target, ArcKind::ControlFlow { executable });
    }

    pub fn add_conditional_dependence(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: ControlDependenceKind,
    ) {
        self.conditional.push((source, target, kind));
    }

    /// Validate shape and freeze
    pub fn mark_built(&mut self) -> Result<()> {
        if self.root == self.exit {
            return Err(SdgError::malformed(format!(
                "{}: root and exit must be distinct nodes",
                self.procedure
            )));
        }
        if self.graph.incoming(self.root).next().is_some() {
            return Err(SdgError::malformed(format!(
                "{}: root {} has incoming control flow",
                self.procedure, self.root
            )));
        }
        if self.graph.outgoing(self.exit).next().is_some() {
            return Err(SdgError::malformed(format!(
                "{}: exit {} has outgoing control flow",
                self.procedure, self.exit
            )));
        }
        for &(s, t, _) in &self.conditional {
            if !self.graph.contains(s) || !self.graph.contains(t) {
                return Err(SdgError::malformed(format!(
                    "{}: conditional dependence {} -> {} leaves the CFG",
                    self.procedure, s, t
                )));
            }
        }
        self.built = true;
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn procedure(&self) -> ProcedureId {
        self.procedure
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn exit(&self) -> NodeId {
        self.exit
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains(id)
    }

    /// Vertices in ascending id order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn graph(&self) -> &ArcGraph {
        &self.graph
    }

    pub fn conditional_dependences(&self) -> &[(NodeId, NodeId, ControlDependenceKind)] {
        &self.conditional
    }

    /// Successors with their executable flag
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, bool)> + '_ {
        self.graph.outgoing(id).filter_map(|(t, k)| match k {
            ArcKind::ControlFlow { executable } => Some((t, *executable)),
            _ => None,
        })
    }

    pub fn executable_successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.successors(id).filter(|(_, e)| *e).map(|(t, _)| t)
    }

    pub fn executable_predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .incoming(id)
            .filter(|(_, k)| k.is_executable_flow())
            .map(|(s, _)| s)
    }

    /// Unique executable successor of a pseudo-predicate.
    ///
    /// A pseudo-predicate has exactly one executable successor and at least one
    /// non-executable one (an unconditional jump with its virtual fallthrough).
    pub fn pseudo_predicate_target(&self, id: NodeId) -> Option<NodeId> {
        let mut executable = None;
        let mut virtual_arcs = 0usize;
        for (t, exec) in self.successors(id) {
            if exec {
                if executable.is_some_and(|e| e != t) {
                    return None;
                }
                executable = Some(t);
            } else {
                virtual_arcs += 1;
            }
        }
        if virtual_arcs > 0 {
            executable
        } else {
            None
        }
    }
}

/// A procedure as delivered by the front end
#[derive(Debug, Clone)]
pub struct Procedure {
    pub id: ProcedureId,
    pub name: String,
    pub signature: Signature,
    pub cfg: ControlFlowGraph,
}

impl Procedure {
    pub fn entry(&self) -> NodeId {
        self.cfg.root()
    }
}

/// All procedures of a program plus the arena owning their nodes
#[derive(Debug, Clone, Default)]
pub struct Program {
    arena: NodeArena,
    procedures: Vec<Procedure>,
}

impl Program {
    pub fn new(arena: NodeArena, procedures: Vec<Procedure>) -> Self {
        Program { arena, procedures }
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    pub fn procedure(&self, id: ProcedureId) -> Option<&Procedure> {
        self.procedures.get(id.index())
    }

    pub fn procedure_by_name(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    pub fn into_parts(self) -> (NodeArena, Vec<Procedure>) {
        (self.arena, self.procedures)
    }
}
