//! Variable actions: what a statement does to a variable.

use super::NodeId;
use serde::{Deserialize, Serialize};

/// Kind of variable action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Declaration,
    Definition,
    Usage,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Declaration => "declaration",
            ActionKind::Definition => "definition",
            ActionKind::Usage => "usage",
        }
    }
}

/// One declaration, definition or usage of a named variable.
///
/// The sequence index of an action is its position in the owning node's
/// action list; the list preserves source evaluation order (`x = x + 1` is
/// `Usage(x)` then `Definition(x)`).
///
/// `host` marks a movable action: it sits in the statement's sequence (so
/// reaching-definition search sees it in the right place) but dependences
/// attach to the host node instead, e.g. an argument usage hosted on its
/// actual-in node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAction {
    pub kind: ActionKind,
    pub variable: String,
    /// May not execute on every path through the node
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<NodeId>,
}

impl VariableAction {
    pub fn new(kind: ActionKind, variable: impl Into<String>) -> Self {
        VariableAction {
            kind,
            variable: variable.into(),
            optional: false,
            host: None,
        }
    }

    pub fn declaration(variable: impl Into<String>) -> Self {
        Self::new(ActionKind::Declaration, variable)
    }

    pub fn definition(variable: impl Into<String>) -> Self {
        Self::new(ActionKind::Definition, variable)
    }

    pub fn usage(variable: impl Into<String>) -> Self {
        Self::new(ActionKind::Usage, variable)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn hosted_on(mut self, host: NodeId) -> Self {
        self.host = Some(host);
        self
    }

    /// Node the dependence arcs of this action attach to
    pub fn host_or(&self, owner: NodeId) -> NodeId {
        self.host.unwrap_or(owner)
    }
}

/// Position of an action: owning node plus sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRef {
    pub node: NodeId,
    pub index: usize,
}

impl ActionRef {
    pub fn new(node: NodeId, index: usize) -> Self {
        ActionRef { node, index }
    }
}
