//! Slicing domain models

use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Starting point of a slice: a node, optionally restricted to one variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlicingCriterion {
    pub node: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

impl SlicingCriterion {
    pub fn node(node: NodeId) -> Self {
        SlicingCriterion { node, variable: None }
    }

    /// Only data dependences on `variable` are followed into the criterion
    pub fn restricted(node: NodeId, variable: impl Into<String>) -> Self {
        SlicingCriterion {
            node,
            variable: Some(variable.into()),
        }
    }
}

impl fmt::Display for SlicingCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variable {
            Some(v) => write!(f, "{} [{}]", self.node, v),
            None => write!(f, "{}", self.node),
        }
    }
}

/// Nodes of the system dependence graph a criterion depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    criterion: SlicingCriterion,
    nodes: BTreeSet<NodeId>,
}

impl Slice {
    pub fn new(criterion: SlicingCriterion, nodes: BTreeSet<NodeId>) -> Self {
        Slice { criterion, nodes }
    }

    pub fn criterion(&self) -> &SlicingCriterion {
        &self.criterion
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ascending node ids
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    pub fn is_subset(&self, other: &Slice) -> bool {
        self.nodes.is_subset(&other.nodes)
    }
}

/// One slice member as shown to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceEntry {
    pub id: NodeId,
    pub procedure: String,
    pub role: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub synthetic: bool,
}

/// Serializable slice with node details, sorted by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceReport {
    pub criterion: SlicingCriterion,
    pub algorithm: String,
    pub size: usize,
    pub nodes: Vec<SliceEntry>,
}
