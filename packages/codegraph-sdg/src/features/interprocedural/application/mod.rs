//! Interprocedural Application Layer
//!
//! Main entry point: `resolve_call_sites()`

use crate::errors::Result;
use crate::features::flow_graph::Program;
use crate::features::interprocedural::domain::{ResolvedCallee, ResolvedCalls};
use crate::features::interprocedural::ports::CallResolver;
use crate::shared::models::NodeId;
use rustc_hash::FxHashMap;
use tracing::warn;

/// Resolve every call-site marker of `program`.
///
/// Unresolved sites are logged and left out of the map.
pub fn resolve_call_sites(program: &Program, resolver: &dyn CallResolver) -> Result<ResolvedCalls> {
    let by_entry: FxHashMap<NodeId, usize> = program
        .procedures()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.entry(), i))
        .collect();

    let mut resolved = ResolvedCalls::default();
    for procedure in program.procedures() {
        for n in procedure.cfg.nodes() {
            let node = program.arena().node(n)?;
            for (site_index, site) in node.calls.iter().enumerate() {
                let callee = resolver
                    .resolve(node, site)
                    .and_then(|entry| by_entry.get(&entry))
                    .map(|&i| &program.procedures()[i]);
                match callee {
                    Some(callee) => {
                        resolved.insert(
                            (n, site_index),
                            ResolvedCallee {
                                procedure: callee.id,
                                entry: callee.entry(),
                                signature: callee.signature.clone(),
                            },
                        );
                    }
                    None => warn!(
                        caller = %procedure.name,
                        node = %n,
                        callee = %site.callee,
                        "unresolved call; no interprocedural arcs"
                    ),
                }
            }
        }
    }
    Ok(resolved)
}
