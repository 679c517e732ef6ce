/*
 * PDG Assembler
 *
 * CFG → PDG in five steps:
 * 1. formals: formal-in/out nodes, with movable actions at entry and exit
 * 2. calls: call, actual-in/out and return nodes, with movable actions
 *    inserted at the marker position of the containing statement
 * 3. control dependence over the CFG
 * 4. data dependence (arcs land on action hosts)
 * 5. call expansion: attach spawned nodes to the call node, the call node to
 *    its container, and formals to the entry
 *
 * The canonical exit never enters the PDG.
 */

use crate::config::ControlDependenceConfig;
use crate::errors::{Result, SdgError};
use crate::features::control_dependence::build_control_dependence;
use crate::features::data_flow::build_data_dependence;
use crate::features::flow_graph::Procedure;
use crate::features::interprocedural::ResolvedCalls;
use crate::features::pdg::domain::{CallSiteNodes, FormalNodes};
use crate::features::pdg::infrastructure::ProcedureDependenceGraph;
use crate::shared::models::{
    ArcGraph, ArcKind, NodeArena, NodeFactory, NodeId, NodeKind, ParameterMode, VariableAction,
    RETURN_VARIABLE,
};
use tracing::debug;

/// Single-use builder of one procedure's PDG
pub struct PdgAssembler<'a> {
    arena: &'a mut NodeArena,
    config: &'a ControlDependenceConfig,
    resolved: &'a ResolvedCalls,
}

impl<'a> PdgAssembler<'a> {
    pub fn new(
        arena: &'a mut NodeArena,
        config: &'a ControlDependenceConfig,
        resolved: &'a ResolvedCalls,
    ) -> Self {
        PdgAssembler {
            arena,
            config,
            resolved,
        }
    }

    /// Build the PDG; consumes the assembler so it runs at most once
    pub fn assemble(mut self, procedure: &Procedure) -> Result<ProcedureDependenceGraph> {
        let cfg = &procedure.cfg;
        if !cfg.is_built() {
            return Err(SdgError::CfgNotBuilt(procedure.name.clone()));
        }

        let mut graph = ArcGraph::new();
        for n in cfg.nodes() {
            if n != cfg.exit() {
                graph.add_node(n);
            }
        }

        let formals = self.prepare_formals(procedure, &mut graph)?;
        let call_sites = self.prepare_calls(procedure, &mut graph)?;

        let control = build_control_dependence(cfg, &mut graph, self.config)?;
        let data = build_data_dependence(cfg, self.arena, &mut graph)?;

        for site in &call_sites {
            graph.add_arc(site.container, site.call, ArcKind::control());
            for spawned in site.spawned() {
                graph.add_arc(site.call, spawned, ArcKind::Structural);
            }
        }
        for formal in formals.all() {
            graph.add_arc(cfg.root(), formal, ArcKind::control());
        }

        debug!(
            procedure = %procedure.name,
            nodes = graph.node_count(),
            control,
            data,
            call_sites = call_sites.len(),
            "PDG assembled"
        );

        Ok(ProcedureDependenceGraph::new(
            procedure.id,
            procedure.name.clone(),
            cfg.root(),
            graph,
            formals,
            call_sites,
        ))
    }

    /// Formal nodes plus their movable actions:
    /// `Declaration(p) Definition(p)` at the entry, `Usage` at the exit.
    fn prepare_formals(&mut self, procedure: &Procedure, graph: &mut ArcGraph) -> Result<FormalNodes> {
        let id = procedure.id;
        let mut formals = FormalNodes::default();
        let mut entry_actions = Vec::new();
        let mut exit_actions = Vec::new();

        for (position, param) in procedure.signature.parameters.iter().enumerate() {
            let fin = self.arena.create_synthetic(
                id,
                NodeKind::FormalIn { position },
                format!("{} = {}_in", param.name, param.name),
            );
            entry_actions.push(VariableAction::declaration(param.name.as_str()).hosted_on(fin));
            entry_actions.push(VariableAction::definition(param.name.as_str()).hosted_on(fin));
            formals.ins.push(fin);
            formals.types.push(param.type_name.clone());
            graph.add_node(fin);

            if param.mode == ParameterMode::InOut {
                let fout = self.arena.create_synthetic(
                    id,
                    NodeKind::FormalOut { position },
                    format!("{}_out = {}", param.name, param.name),
                );
                exit_actions.push(VariableAction::usage(param.name.as_str()).hosted_on(fout));
                formals.outs.push((position, fout));
                graph.add_node(fout);
            }
        }

        if procedure.signature.returns_value {
            let ret = self.arena.create_synthetic(
                id,
                NodeKind::FormalReturn,
                format!("{}_out = {}", procedure.name, RETURN_VARIABLE),
            );
            exit_actions.push(VariableAction::usage(RETURN_VARIABLE).hosted_on(ret));
            formals.ret = Some(ret);
            graph.add_node(ret);
        }

        self.arena
            .node_mut(procedure.cfg.root())?
            .actions
            .splice(0..0, entry_actions);
        self.arena
            .node_mut(procedure.cfg.exit())?
            .actions
            .extend(exit_actions);
        Ok(formals)
    }

    /// Call, actual and return nodes for every call marker.
    ///
    /// Inserted at the marker, in order: argument usages (hosted on actual-ins),
    /// write-back definitions (actual-outs), the result definition (return
    /// node) and, when the statement reads the result, its usage.
    fn prepare_calls(&mut self, procedure: &Procedure, graph: &mut ArcGraph) -> Result<Vec<CallSiteNodes>> {
        let id = procedure.id;
        let mut all_sites = Vec::new();

        for container in procedure.cfg.nodes() {
            let sites = self.arena.node(container)?.calls.clone();
            if sites.is_empty() {
                continue;
            }
            // Later markers first so earlier positions stay valid
            let mut order: Vec<usize> = (0..sites.len()).collect();
            order.sort_by(|&a, &b| sites[b].position.cmp(&sites[a].position).then(b.cmp(&a)));

            let mut spawned_sites = Vec::with_capacity(sites.len());
            for site_index in order {
                let site = &sites[site_index];
                let resolved = self.resolved.get(&(container, site_index));
                let call = self.arena.create_synthetic(
                    id,
                    NodeKind::Call {
                        container,
                        site: site_index,
                    },
                    site.label(),
                );
                graph.add_node(call);

                let mut movable = Vec::new();
                let mut actual_ins = Vec::with_capacity(site.arguments.len());
                for (position, arg) in site.arguments.iter().enumerate() {
                    let label = match resolved.and_then(|r| r.signature.parameter_at(position)) {
                        Some(param) => format!("{}_in = {}", param.name, arg.text),
                        None => arg.text.clone(),
                    };
                    let ain = self
                        .arena
                        .create_synthetic(id, NodeKind::ActualIn { call, position }, label);
                    movable.extend(
                        arg.uses
                            .iter()
                            .map(|u| VariableAction::usage(u.as_str()).hosted_on(ain)),
                    );
                    actual_ins.push(ain);
                    graph.add_node(ain);
                }

                let mut actual_outs = Vec::new();
                if let Some(callee) = resolved {
                    for (position, arg) in site.arguments.iter().enumerate() {
                        let Some(param) = callee.signature.parameter_at(position) else {
                            continue;
                        };
                        let (ParameterMode::InOut, Some(variable)) = (param.mode, arg.variable.as_ref()) else {
                            continue;
                        };
                        let aout = self.arena.create_synthetic(
                            id,
                            NodeKind::ActualOut { call, position },
                            format!("{} = {}_out", variable, param.name),
                        );
                        movable.push(VariableAction::definition(variable.as_str()).hosted_on(aout));
                        actual_outs.push((position, aout));
                        graph.add_node(aout);
                    }
                }

                let mut result = None;
                if site.result_used {
                    let ret = self.arena.create_synthetic(
                        id,
                        NodeKind::CallReturn { call },
                        format!("{} = {}", result_variable(call), site.callee),
                    );
                    movable.push(VariableAction::definition(result_variable(call)).hosted_on(ret));
                    movable.push(VariableAction::usage(result_variable(call)));
                    result = Some(ret);
                    graph.add_node(ret);
                }

                let actions = &mut self.arena.node_mut(container)?.actions;
                let at = site.position.min(actions.len());
                actions.splice(at..at, movable);

                spawned_sites.push(CallSiteNodes {
                    call,
                    container,
                    site: site_index,
                    callee_name: site.callee.clone(),
                    callee: resolved.map(|r| r.procedure),
                    actual_ins,
                    actual_outs,
                    result,
                    argument_types: site.arguments.iter().map(|a| a.type_name.clone()).collect(),
                });
            }
            spawned_sites.sort_by_key(|s| s.site);
            all_sites.extend(spawned_sites);
        }
        Ok(all_sites)
    }
}

/// Per-call variable carrying the returned value into the statement
fn result_variable(call: NodeId) -> String {
    format!("{}{}", RETURN_VARIABLE, call.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::{Program, ProgramBuilder};
    use crate::features::interprocedural::{resolve_call_sites, NameCallResolver, SymbolContext};
    use crate::shared::models::{Argument, CallSite, Signature};

    /// f(x) { y = x; return y; }
    fn single_procedure() -> (Program, NodeId, NodeId) {
        let mut program = ProgramBuilder::new();
        let mut f = program.procedure("f", Signature::new().parameter("x").returns());
        let s1 = f.statement("y = x", [VariableAction::usage("x"), VariableAction::definition("y")]);
        let s2 = f.statement(
            "return y",
            [VariableAction::usage("y"), VariableAction::definition(RETURN_VARIABLE)],
        );
        let (entry, exit) = (f.entry(), f.exit());
        f.chain(&[entry, s1, s2, exit]);
        f.finish().unwrap();
        (program.build(), s1, s2)
    }

    fn assemble_all(program: Program) -> (NodeArena, Vec<ProcedureDependenceGraph>) {
        let resolver = NameCallResolver::new(SymbolContext::from_program(&program));
        let resolved = resolve_call_sites(&program, &resolver).unwrap();
        let (mut arena, procedures) = program.into_parts();
        let config = ControlDependenceConfig::default();
        let pdgs = procedures
            .iter()
            .map(|p| PdgAssembler::new(&mut arena, &config, &resolved).assemble(p))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        (arena, pdgs)
    }

    #[test]
    fn test_formals_are_wired() {
        let (program, s1, s2) = single_procedure();
        let exit = program.procedures()[0].cfg.exit();
        let (_arena, pdgs) = assemble_all(program);
        let pdg = &pdgs[0];

        let fin = pdg.formals().formal_in(0).unwrap();
        let ret = pdg.formals().ret.unwrap();
        let g = pdg.graph();
        assert!(g.has_arc_where(fin, s1, |k| k.variable() == Some("x")));
        assert!(g.has_arc_where(s1, s2, |k| k.variable() == Some("y")));
        assert!(g.has_arc_where(s2, ret, |k| k.variable() == Some(RETURN_VARIABLE)));
        assert!(g.has_arc(pdg.entry(), fin, &ArcKind::control()));
        assert!(g.has_arc(pdg.entry(), ret, &ArcKind::control()));
        assert!(!pdg.contains(exit));
    }

    #[test]
    fn test_call_expansion() {
        let mut program = ProgramBuilder::new();
        let mut inc = program.procedure("inc", Signature::new().in_out("a").returns());
        let body = inc.statement(
            "a = a + 1; return a",
            [
                VariableAction::usage("a"),
                VariableAction::definition("a"),
                VariableAction::definition(RETURN_VARIABLE),
            ],
        );
        let (e, x) = (inc.entry(), inc.exit());
        inc.chain(&[e, body, x]);
        inc.finish().unwrap();

        let mut main = program.procedure("main", Signature::new());
        let def = main.statement("v = 0", [VariableAction::definition("v")]);
        let call = main.statement("w = inc(v)", [VariableAction::definition("w")]);
        main.call(call, CallSite::new("inc").argument(Argument::variable("v")).using_result())
            .unwrap();
        let after = main.statement("print(v)", [VariableAction::usage("v")]);
        let (e, x) = (main.entry(), main.exit());
        main.chain(&[e, def, call, after, x]);
        main.finish().unwrap();

        let (arena, pdgs) = assemble_all(program.build());
        let pdg = &pdgs[1];
        let site = &pdg.call_sites()[0];
        let g = pdg.graph();

        let ain = site.actual_in(0).unwrap();
        let aout = site.actual_out(0).unwrap();
        let ret = site.result.unwrap();
        assert_eq!(site.callee, Some(pdgs[0].procedure()));
        assert!(g.has_arc(call, site.call, &ArcKind::control()));
        for n in [ain, aout, ret] {
            assert!(g.has_arc(site.call, n, &ArcKind::Structural));
        }
        assert!(g.has_arc_where(def, ain, |k| k.variable() == Some("v")));
        assert!(g.has_arc_where(aout, after, |k| k.variable() == Some("v")));
        assert!(!g.has_arc_where(def, after, |k| k.is_data_dependence()));
        assert!(g.has_arc_where(ret, call, |k| k.is_data_dependence()));

        let actions = &arena.node(call).unwrap().actions;
        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0].host, Some(ain));
        assert_eq!(actions[4].variable, "w");
    }

    #[test]
    fn test_unbuilt_cfg_is_rejected() {
        use crate::features::flow_graph::ControlFlowGraph;
        use crate::shared::models::ProcedureId;

        let mut arena = NodeArena::new();
        let entry = arena.create_node(ProcedureId(0), NodeKind::Entry, "ENTER f".into());
        let exit = arena.create_node(ProcedureId(0), NodeKind::Exit, "EXIT f".into());
        let procedure = Procedure {
            id: ProcedureId(0),
            name: "f".into(),
            signature: Signature::new(),
            cfg: ControlFlowGraph::new(ProcedureId(0), entry, exit),
        };
        let config = ControlDependenceConfig::default();
        let resolved = ResolvedCalls::default();
        let err = PdgAssembler::new(&mut arena, &config, &resolved)
            .assemble(&procedure)
            .unwrap_err();
        assert!(matches!(err, SdgError::CfgNotBuilt(name) if name == "f"));
    }
}
