//! Interprocedural Ports

use crate::shared::models::{CallSite, GraphNode, NodeId, ProcedureId};

// ═══════════════════════════════════════════════════════════════════════════
// Call Resolver Port
// ═══════════════════════════════════════════════════════════════════════════

/// Oracle deciding which procedure a call site invokes.
///
/// Returning `None` marks the call as unresolved (dynamic dispatch the front
/// end could not pin down, library code, ...). Slices are sound only with
/// respect to resolved calls.
///
/// # Implementors
/// - `NameCallResolver` (infrastructure/resolver.rs)
pub trait CallResolver: Send + Sync {
    /// Entry node of the callee
    fn resolve(&self, caller: &GraphNode, site: &CallSite) -> Option<NodeId>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Call Graph Provider Port
// ═══════════════════════════════════════════════════════════════════════════

/// Read access to a call graph
pub trait CallGraphProvider {
    fn callees(&self, procedure: ProcedureId) -> Vec<ProcedureId>;

    fn callers(&self, procedure: ProcedureId) -> Vec<ProcedureId>;

    fn procedures(&self) -> Vec<ProcedureId>;

    /// Callees before callers; members of one recursive cycle stay together
    fn bottom_up_order(&self) -> Vec<ProcedureId>;
}
