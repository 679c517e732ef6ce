//! Graph nodes and call-site markers.

use super::{NodeId, ProcedureId, VariableAction};
use serde::{Deserialize, Serialize};

/// Role of a node in the dependence graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum NodeKind {
    /// Procedure entry (CFG root)
    Entry,
    /// Canonical CFG exit, folded away in the PDG
    Exit,
    /// Ordinary statement or predicate
    Statement,
    /// Call node spawned from the `site`-th call marker of `container`
    Call { container: NodeId, site: usize },
    /// Actual-in node of argument `position` of `call`
    ActualIn { call: NodeId, position: usize },
    /// Actual-out node of argument `position` of `call`
    ActualOut { call: NodeId, position: usize },
    /// Receives the callee's return value
    CallReturn { call: NodeId },
    FormalIn { position: usize },
    FormalOut { position: usize },
    /// Exit summary node carrying the return value
    FormalReturn,
}

impl NodeKind {
    /// Call node this node belongs to, for actual parameter and return nodes
    pub fn owning_call(&self) -> Option<NodeId> {
        match *self {
            NodeKind::ActualIn { call, .. }
            | NodeKind::ActualOut { call, .. }
            | NodeKind::CallReturn { call } => Some(call),
            _ => None,
        }
    }

    pub fn is_formal_in(&self) -> bool {
        matches!(self, NodeKind::FormalIn { .. })
    }

    pub fn is_formal_out(&self) -> bool {
        matches!(self, NodeKind::FormalOut { .. } | NodeKind::FormalReturn)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Entry => "entry",
            NodeKind::Exit => "exit",
            NodeKind::Statement => "statement",
            NodeKind::Call { .. } => "call",
            NodeKind::ActualIn { .. } => "actual_in",
            NodeKind::ActualOut { .. } => "actual_out",
            NodeKind::CallReturn { .. } => "call_return",
            NodeKind::FormalIn { .. } => "formal_in",
            NodeKind::FormalOut { .. } => "formal_out",
            NodeKind::FormalReturn => "formal_return",
        }
    }
}

/// One argument expression of a call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Argument {
    /// Source text, used as the actual-in label
    pub text: String,
    /// Variables read while evaluating the argument
    #[serde(default)]
    pub uses: Vec<String>,
    /// Set when the argument is a plain variable that an `InOut` parameter can write back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Argument {
    /// Plain variable argument
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        Argument {
            text: name.clone(),
            uses: vec![name.clone()],
            variable: Some(name),
            type_name: None,
        }
    }

    /// Expression argument reading `uses`
    pub fn expression(text: impl Into<String>, uses: &[&str]) -> Self {
        Argument {
            text: text.into(),
            uses: uses.iter().map(|u| u.to_string()).collect(),
            variable: None,
            type_name: None,
        }
    }

    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Call-site marker on a statement node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub callee: String,
    /// Index into the statement's actions at which the call executes
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// The statement reads the returned value
    #[serde(default)]
    pub result_used: bool,
}

impl CallSite {
    pub fn new(callee: impl Into<String>) -> Self {
        CallSite {
            callee: callee.into(),
            position: 0,
            arguments: Vec::new(),
            result_used: false,
        }
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn using_result(mut self) -> Self {
        self.result_used = true;
        self
    }

    pub fn label(&self) -> String {
        let args: Vec<&str> = self.arguments.iter().map(|a| a.text.as_str()).collect();
        format!("{}({})", self.callee, args.join(", "))
    }
}

/// One instruction/statement unit.
///
/// Only `actions` changes after creation, and only while the PDG assembler
/// inserts movable actions; afterwards the node is frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub procedure: ProcedureId,
    pub kind: NodeKind,
    pub label: String,
    /// Front-end statement text, never interpreted here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub actions: Vec<VariableAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<CallSite>,
    /// Introduced by the engine rather than the front end
    pub synthetic: bool,
}

impl GraphNode {
    pub fn new(id: NodeId, procedure: ProcedureId, kind: NodeKind, label: impl Into<String>) -> Self {
        GraphNode {
            id,
            procedure,
            kind,
            label: label.into(),
            payload: None,
            line: None,
            actions: Vec::new(),
            calls: Vec::new(),
            synthetic: false,
        }
    }

    pub fn has_calls(&self) -> bool {
        !self.calls.is_empty()
    }
}
