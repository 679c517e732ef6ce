/*
 * PDG (Procedure Dependence Graph)
 *
 * PDG = CFG vertices (minus the canonical exit)
 *     + formal / call / actual / return nodes
 *     + control, data and structural arcs
 *
 * Produced once by `PdgAssembler`, read-only afterwards.
 */

use crate::features::pdg::domain::{CallSiteNodes, FormalNodes};
use crate::shared::models::{ArcGraph, NodeId, ProcedureId};

#[derive(Debug, Clone)]
pub struct ProcedureDependenceGraph {
    procedure: ProcedureId,
    name: String,
    entry: NodeId,
    graph: ArcGraph,
    formals: FormalNodes,
    call_sites: Vec<CallSiteNodes>,
}

impl ProcedureDependenceGraph {
    pub(crate) fn new(
        procedure: ProcedureId,
        name: String,
        entry: NodeId,
        graph: ArcGraph,
        formals: FormalNodes,
        call_sites: Vec<CallSiteNodes>,
    ) -> Self {
        ProcedureDependenceGraph {
            procedure,
            name,
            entry,
            graph,
            formals,
            call_sites,
        }
    }

    pub fn procedure(&self) -> ProcedureId {
        self.procedure
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    pub fn graph(&self) -> &ArcGraph {
        &self.graph
    }

    pub fn formals(&self) -> &FormalNodes {
        &self.formals
    }

    pub fn call_sites(&self) -> &[CallSiteNodes] {
        &self.call_sites
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains(id)
    }

    /// Nodes in ascending id order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }
}
