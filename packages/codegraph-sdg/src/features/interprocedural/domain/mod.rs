mod call_graph;

pub use call_graph::CallGraph;

use crate::shared::models::{NodeId, ProcedureId, Signature};
use rustc_hash::FxHashMap;

/// Target of a resolved call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCallee {
    pub procedure: ProcedureId,
    pub entry: NodeId,
    pub signature: Signature,
}

/// Resolution of every call-site marker, keyed by (container node, site index)
pub type ResolvedCalls = FxHashMap<(NodeId, usize), ResolvedCallee>;
