//! Name-based call resolution over an explicit symbol registry.

use crate::features::flow_graph::Program;
use crate::features::interprocedural::ports::CallResolver;
use crate::shared::models::{CallSite, GraphNode, NodeId, ProcedureId, Signature};
use rustc_hash::FxHashMap;
use tracing::trace;

/// What the resolver knows about one procedure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSymbol {
    pub id: ProcedureId,
    pub entry: NodeId,
    pub signature: Signature,
}

/// Procedure symbols by name.
///
/// Passed to whoever needs type or symbol facts; there is no process-wide
/// registry.
#[derive(Debug, Clone, Default)]
pub struct SymbolContext {
    procedures: FxHashMap<String, ProcedureSymbol>,
}

impl SymbolContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_program(program: &Program) -> Self {
        let mut ctx = SymbolContext::new();
        for procedure in program.procedures() {
            ctx.register(
                procedure.name.clone(),
                ProcedureSymbol {
                    id: procedure.id,
                    entry: procedure.entry(),
                    signature: procedure.signature.clone(),
                },
            );
        }
        ctx
    }

    /// Later registrations shadow earlier ones
    pub fn register(&mut self, name: impl Into<String>, symbol: ProcedureSymbol) {
        self.procedures.insert(name.into(), symbol);
    }

    pub fn lookup(&self, name: &str) -> Option<&ProcedureSymbol> {
        self.procedures.get(name)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

/// Resolves a call by callee name, rejecting arity mismatches
#[derive(Debug, Clone)]
pub struct NameCallResolver {
    context: SymbolContext,
}

impl NameCallResolver {
    pub fn new(context: SymbolContext) -> Self {
        NameCallResolver { context }
    }

    pub fn context(&self) -> &SymbolContext {
        &self.context
    }
}

impl CallResolver for NameCallResolver {
    fn resolve(&self, caller: &GraphNode, site: &CallSite) -> Option<NodeId> {
        let symbol = self.context.lookup(&site.callee)?;
        if symbol.signature.parameters.len() != site.arguments.len() {
            trace!(
                caller = %caller.id,
                callee = %site.callee,
                expected = symbol.signature.parameters.len(),
                found = site.arguments.len(),
                "arity mismatch"
            );
            return None;
        }
        Some(symbol.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Argument, NodeKind};

    fn context() -> SymbolContext {
        let mut ctx = SymbolContext::new();
        ctx.register(
            "inc",
            ProcedureSymbol {
                id: ProcedureId(1),
                entry: NodeId(10),
                signature: Signature::new().parameter("a"),
            },
        );
        ctx
    }

    #[test]
    fn test_resolves_by_name() {
        let resolver = NameCallResolver::new(context());
        let caller = GraphNode::new(NodeId(3), ProcedureId(0), NodeKind::Statement, "y = inc(x)");
        let site = CallSite::new("inc").argument(Argument::variable("x"));
        assert_eq!(resolver.resolve(&caller, &site), Some(NodeId(10)));
    }

    #[test]
    fn test_unknown_name_and_arity_mismatch_do_not_resolve() {
        let resolver = NameCallResolver::new(context());
        let caller = GraphNode::new(NodeId(3), ProcedureId(0), NodeKind::Statement, "call");
        assert_eq!(resolver.resolve(&caller, &CallSite::new("dec")), None);
        assert_eq!(resolver.resolve(&caller, &CallSite::new("inc")), None);
    }
}
