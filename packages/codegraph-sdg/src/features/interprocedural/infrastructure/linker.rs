//! Interprocedural linker: call, parameter and return arcs.

use crate::features::pdg::ProcedureDependenceGraph;
use crate::shared::models::{ArcGraph, ArcKind, ParameterDirection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub calls: usize,
    pub parameter_in: usize,
    pub parameter_out: usize,
    pub returns: usize,
    pub unresolved: usize,
}

/// Link every resolved call site of `pdgs` to its callee.
///
/// `pdgs` is indexed by procedure id. Actual-in and formal-in nodes match by
/// position, and by type when both sides declare one.
pub fn link_procedures(pdgs: &[ProcedureDependenceGraph], graph: &mut ArcGraph) -> LinkStats {
    let mut stats = LinkStats::default();

    for pdg in pdgs {
        for site in pdg.call_sites() {
            let Some(callee_id) = site.callee else {
                stats.unresolved += 1;
                continue;
            };
            let Some(callee) = pdgs.get(callee_id.index()) else {
                warn!(callee = %callee_id, call = %site.call, "callee has no dependence graph; call skipped");
                stats.unresolved += 1;
                continue;
            };
            let formals = callee.formals();

            graph.add_arc(site.call, callee.entry(), ArcKind::Call);
            stats.calls += 1;

            for (position, &actual) in site.actual_ins.iter().enumerate() {
                let Some(formal) = formals.formal_in(position) else {
                    continue;
                };
                let argument_type = site.argument_types.get(position).and_then(|t| t.as_deref());
                if !types_compatible(argument_type, formals.parameter_type(position)) {
                    debug!(
                        call = %site.call,
                        position,
                        "argument type does not match parameter; no parameter arc"
                    );
                    continue;
                }
                graph.add_arc(
                    actual,
                    formal,
                    ArcKind::ParameterInOut(ParameterDirection::Input),
                );
                stats.parameter_in += 1;
            }

            for &(position, actual) in &site.actual_outs {
                if let Some(formal) = formals.formal_out(position) {
                    graph.add_arc(
                        formal,
                        actual,
                        ArcKind::ParameterInOut(ParameterDirection::Output),
                    );
                    stats.parameter_out += 1;
                }
            }

            if let (Some(result), Some(ret)) = (site.result, formals.ret) {
                graph.add_arc(ret, result, ArcKind::Return);
                stats.returns += 1;
            }
        }
    }

    debug!(
        calls = stats.calls,
        parameter_in = stats.parameter_in,
        parameter_out = stats.parameter_out,
        returns = stats.returns,
        unresolved = stats.unresolved,
        "procedures linked"
    );
    stats
}

fn types_compatible(argument: Option<&str>, parameter: Option<&str>) -> bool {
    match (argument, parameter) {
        (Some(a), Some(p)) => a == p,
        _ => true,
    }
}
