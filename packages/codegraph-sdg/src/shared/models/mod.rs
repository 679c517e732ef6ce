//! Graph models shared by CFG, PDG and SDG.
//!
//! Nodes live in a [`NodeArena`] and are addressed by [`NodeId`]; graphs only
//! hold ids, never references, so one node can appear in the CFG, its PDG and
//! the SDG at the same time.

mod arc;
mod arena;
mod graph;
mod ids;
mod node;
mod signature;
mod variable_action;

pub use arc::{ArcKind, ControlDependenceKind, DataDependence, ParameterDirection};
pub use arena::{NodeArena, NodeFactory};
pub use graph::ArcGraph;
pub use ids::{NodeId, ProcedureId};
pub use node::{Argument, CallSite, GraphNode, NodeKind};
pub use signature::{Parameter, ParameterMode, Signature, RETURN_VARIABLE};
pub use variable_action::{ActionKind, ActionRef, VariableAction};
