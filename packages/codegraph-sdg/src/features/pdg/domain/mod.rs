//! PDG domain models: the synthetic nodes spawned for formals and call sites.

use crate::shared::models::{NodeId, NodeKind, ProcedureId};
use serde::{Deserialize, Serialize};

/// Formal parameter nodes of a procedure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormalNodes {
    /// One per parameter, by position
    pub ins: Vec<NodeId>,
    /// (position, node) for every `InOut` parameter
    pub outs: Vec<(usize, NodeId)>,
    /// Return-value node when the procedure returns a value
    pub ret: Option<NodeId>,
    /// Declared parameter types, by position
    pub types: Vec<Option<String>>,
}

impl FormalNodes {
    pub fn formal_in(&self, position: usize) -> Option<NodeId> {
        self.ins.get(position).copied()
    }

    pub fn parameter_type(&self, position: usize) -> Option<&str> {
        self.types.get(position).and_then(|t| t.as_deref())
    }

    pub fn formal_out(&self, position: usize) -> Option<NodeId> {
        self.outs
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, n)| *n)
    }

    /// Formal-out nodes including the return node
    pub fn all_outs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outs.iter().map(|(_, n)| *n).chain(self.ret)
    }

    pub fn all(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ins.iter().copied().chain(self.all_outs())
    }

    /// Role of a formal node of this procedure
    pub fn kind_of(&self, node: NodeId) -> Option<NodeKind> {
        if let Some(position) = self.ins.iter().position(|&n| n == node) {
            return Some(NodeKind::FormalIn { position });
        }
        if let Some(&(position, _)) = self.outs.iter().find(|(_, n)| *n == node) {
            return Some(NodeKind::FormalOut { position });
        }
        (self.ret == Some(node)).then_some(NodeKind::FormalReturn)
    }
}

/// Nodes materialized for one call-site marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSiteNodes {
    pub call: NodeId,
    /// Statement carrying the marker
    pub container: NodeId,
    /// Index of the marker within the container's call list
    pub site: usize,
    pub callee_name: String,
    /// `None` when the call did not resolve
    pub callee: Option<ProcedureId>,
    pub actual_ins: Vec<NodeId>,
    pub actual_outs: Vec<(usize, NodeId)>,
    pub result: Option<NodeId>,
    /// Declared type of each argument, by position
    pub argument_types: Vec<Option<String>>,
}

impl CallSiteNodes {
    pub fn actual_in(&self, position: usize) -> Option<NodeId> {
        self.actual_ins.get(position).copied()
    }

    pub fn actual_out(&self, position: usize) -> Option<NodeId> {
        self.actual_outs
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, n)| *n)
    }

    /// Actual node matching a callee formal of the given kind
    pub fn actual_for(&self, formal: NodeKind) -> Option<NodeId> {
        match formal {
            NodeKind::FormalIn { position } => self.actual_in(position),
            NodeKind::FormalOut { position } => self.actual_out(position),
            NodeKind::FormalReturn => self.result,
            _ => None,
        }
    }

    pub fn spawned(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.actual_ins
            .iter()
            .copied()
            .chain(self.actual_outs.iter().map(|(_, n)| *n))
            .chain(self.result)
    }
}
