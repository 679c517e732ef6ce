//! CFG provider used by front ends and tests.
//!
//! ```rust,ignore
//! let mut program = ProgramBuilder::new();
//! let mut f = program.procedure("f", Signature::new().parameter("x"));
//! let s1 = f.statement("y = 1", [VariableAction::definition("y")]);
//! f.flow(f.entry(), s1).flow(s1, f.exit());
//! f.finish()?;
//! let program = program.build();
//! ```

use crate::errors::{Result, SdgError};
use crate::features::flow_graph::domain::{ControlFlowGraph, Procedure, Program};
use crate::shared::models::{
    CallSite, ControlDependenceKind, GraphNode, NodeArena, NodeFactory, NodeId, NodeKind, ProcedureId,
    Signature, VariableAction,
};
use tracing::debug;

/// Collects procedures into a [`Program`]
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    arena: NodeArena,
    procedures: Vec<Procedure>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a procedure; entry and exit nodes are created immediately
    pub fn procedure(&mut self, name: impl Into<String>, signature: Signature) -> ProcedureBuilder<'_> {
        let name = name.into();
        let id = ProcedureId(self.procedures.len() as u32);
        let entry = self
            .arena
            .create_node(id, NodeKind::Entry, format!("ENTER {}", name));
        let exit = self
            .arena
            .create_node(id, NodeKind::Exit, format!("EXIT {}", name));
        ProcedureBuilder {
            cfg: ControlFlowGraph::new(id, entry, exit),
            id,
            name,
            signature,
            program: self,
        }
    }

    /// Register a procedure whose CFG was assembled elsewhere
    pub fn add_procedure(&mut self, procedure: Procedure) -> Result<ProcedureId> {
        let expected = ProcedureId(self.procedures.len() as u32);
        if procedure.id != expected {
            return Err(SdgError::malformed(format!(
                "procedure '{}' carries id {} but the next free id is {}",
                procedure.name, procedure.id, expected
            )));
        }
        self.procedures.push(procedure);
        Ok(expected)
    }

    pub fn build(self) -> Program {
        Program::new(self.arena, self.procedures)
    }
}

/// Builds the CFG of one procedure
pub struct ProcedureBuilder<'a> {
    program: &'a mut ProgramBuilder,
    id: ProcedureId,
    name: String,
    signature: Signature,
    cfg: ControlFlowGraph,
}

impl<'a> ProcedureBuilder<'a> {
    pub fn id(&self) -> ProcedureId {
        self.id
    }

    pub fn entry(&self) -> NodeId {
        self.cfg.root()
    }

    pub fn exit(&self) -> NodeId {
        self.cfg.exit()
    }

    /// Add a statement node with its variable actions in evaluation order
    pub fn statement(
        &mut self,
        label: impl Into<String>,
        actions: impl IntoIterator<Item = VariableAction>,
    ) -> NodeId {
        let label = label.into();
        let id = self
            .program
            .arena
            .create_node(self.id, NodeKind::Statement, label.clone());
        if let Some(node) = self.program.arena.get_mut(id) {
            node.payload = Some(label);
            node.actions = actions.into_iter().collect();
        }
        self.cfg.add_node(id);
        id
    }

    /// Attach a call-site marker to a statement
    pub fn call(&mut self, node: NodeId, site: CallSite) -> Result<&mut Self> {
        self.owned_node(node)?.calls.push(site);
        Ok(self)
    }

    pub fn set_line(&mut self, node: NodeId, line: u32) -> Result<&mut Self> {
        self.owned_node(node)?.line = Some(line);
        Ok(self)
    }

    /// Executable control flow
    pub fn flow(&mut self, source: NodeId, target: NodeId) -> &mut Self {
        self.cfg.add_flow(source, target, true);
        self
    }

    /// Non-executable (virtual fallthrough) control flow
    pub fn non_executable(&mut self, source: NodeId, target: NodeId) -> &mut Self {
        self.cfg.add_flow(source, target, false);
        self
    }

    /// Executable flow along consecutive nodes
    pub fn chain(&mut self, nodes: &[NodeId]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.cfg.add_flow(pair[0], pair[1], true);
        }
        self
    }

    pub fn conditional_dependence(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: ControlDependenceKind,
    ) -> &mut Self {
        self.cfg.add_conditional_dependence(source, target, kind);
        self
    }

    /// Validate, freeze and register the procedure
    pub fn finish(self) -> Result<ProcedureId> {
        let ProcedureBuilder {
            program,
            id,
            name,
            signature,
            mut cfg,
        } = self;

        for node in cfg.nodes() {
            let owner = program.arena.node(node)?.procedure;
            if owner != id {
                return Err(SdgError::malformed(format!(
                    "node {} of procedure '{}' belongs to {}",
                    node, name, owner
                )));
            }
        }
        cfg.mark_built()?;
        debug!(procedure = %name, nodes = cfg.node_count(), "CFG built");

        program.add_procedure(Procedure {
            id,
            name,
            signature,
            cfg,
        })
    }

    fn owned_node(&mut self, node: NodeId) -> Result<&mut GraphNode> {
        let id = self.id;
        let n = self.program.arena.node_mut(node)?;
        if n.procedure != id {
            return Err(SdgError::malformed(format!(
                "node {} does not belong to procedure {}",
                node, id
            )));
        }
        Ok(n)
    }
}
