/*
 * Data Dependence Builder
 *
 * For every usage (definition) find the nearest preceding definitions
 * (declaration) of the same variable by walking executable CFG arcs backward.
 *
 * - At the starting node only actions before the query action are eligible,
 *   so `x = x + 1` never satisfies its own usage on the first visit. The
 *   start is not marked visited: coming back around a loop scans it fully.
 * - Within a node actions are scanned last to first. An optional definition
 *   is linked but the walk continues to earlier candidates; a non-optional
 *   one ends the path.
 * - A declaration ends the path for its variable whatever it is searched for.
 */

use crate::errors::Result;
use crate::features::flow_graph::ControlFlowGraph;
use crate::shared::models::{
    ActionKind, ActionRef, ArcGraph, ArcKind, DataDependence, NodeArena, NodeId, VariableAction,
};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// Add the data-dependence arcs of `cfg` to `graph`.
///
/// Arcs connect the *hosts* of the two actions; arcs whose endpoints coincide
/// or fall outside `graph` (the folded-away exit) are not materialized.
/// Returns the number of arcs added.
pub fn build_data_dependence(
    cfg: &ControlFlowGraph,
    arena: &NodeArena,
    graph: &mut ArcGraph,
) -> Result<usize> {
    let mut added = 0;
    for n in cfg.nodes() {
        let node = arena.node(n)?;
        for (i, action) in node.actions.iter().enumerate() {
            let wanted = match action.kind {
                ActionKind::Usage => ActionKind::Definition,
                ActionKind::Definition => ActionKind::Declaration,
                ActionKind::Declaration => continue,
            };
            let target_host = action.host_or(n);
            if !graph.contains(target_host) {
                continue;
            }
            for source in reaching_actions(cfg, arena, n, i, &action.variable, wanted)? {
                let source_action = &arena.node(source.node)?.actions[source.index];
                let source_host = source_action.host_or(source.node);
                if source_host == target_host || !graph.contains(source_host) {
                    continue;
                }
                let dd = DataDependence::between(
                    action.variable.clone(),
                    source,
                    source_action.kind,
                    ActionRef::new(n, i),
                    action.kind,
                )?;
                trace!(from = %source_host, to = %target_host, variable = %action.variable, "data dependence");
                if graph.add_arc_unique(source_host, target_host, ArcKind::DataDependence(dd)) {
                    added += 1;
                }
            }
        }
    }
    debug!(procedure = %cfg.procedure(), arcs = added, "data dependence built");
    Ok(added)
}

/// Actions of kind `wanted` on `variable` that reach action `index` of `start`
pub fn reaching_actions(
    cfg: &ControlFlowGraph,
    arena: &NodeArena,
    start: NodeId,
    index: usize,
    variable: &str,
    wanted: ActionKind,
) -> Result<Vec<ActionRef>> {
    let mut found = Vec::new();
    let start_actions = &arena.node(start)?.actions;
    let prefix = &start_actions[..index.min(start_actions.len())];
    if scan(prefix, start, variable, wanted, &mut found) {
        return Ok(found);
    }

    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut stack: Vec<NodeId> = cfg.executable_predecessors(start).collect();
    while let Some(n) = stack.pop() {
        if !visited.insert(n) {
            continue;
        }
        if scan(&arena.node(n)?.actions, n, variable, wanted, &mut found) {
            continue;
        }
        stack.extend(cfg.executable_predecessors(n));
    }
    Ok(found)
}

/// Scan `actions` backward; true when the path ends here
fn scan(
    actions: &[VariableAction],
    node: NodeId,
    variable: &str,
    wanted: ActionKind,
    found: &mut Vec<ActionRef>,
) -> bool {
    for (i, action) in actions.iter().enumerate().rev() {
        if action.variable != variable {
            continue;
        }
        match action.kind {
            ActionKind::Declaration => {
                if wanted == ActionKind::Declaration {
                    found.push(ActionRef::new(node, i));
                }
                return true;
            }
            ActionKind::Definition if wanted == ActionKind::Definition => {
                found.push(ActionRef::new(node, i));
                if !action.optional {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
