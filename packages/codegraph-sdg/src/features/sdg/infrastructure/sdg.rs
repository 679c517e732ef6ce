/*
 * SDG (System Dependence Graph)
 *
 * build():
 * 1. resolve call sites (CallResolver)
 * 2. one PDG per procedure (PdgAssembler)
 * 3. merge PDG arcs into one graph
 * 4. call / parameter / return arcs (linker)
 * 5. summary arcs (fixed point over the call graph, or naive)
 *
 * Every step works on locals; the SDG only changes once all of them
 * succeeded. After that the graph is read-only apart from re-running the
 * summary analysis, and `&SystemDependenceGraph` can be sliced from many
 * threads at once.
 */

use crate::config::{SdgConfig, SlicingAlgorithmKind};
use crate::errors::{Result, SdgError};
use crate::features::flow_graph::Program;
use crate::features::interprocedural::{
    link_procedures, resolve_call_sites, CallGraph, CallGraphProvider, CallResolver,
    NameCallResolver, SymbolContext,
};
use crate::features::pdg::{PdgAssembler, ProcedureDependenceGraph};
use crate::features::sdg::domain::{BuildSummary, SdgStats};
use crate::features::slicing::{
    ClassicSlicing, PseudoPredicateSlicing, Slice, SliceEntry, SliceReport, SlicingAlgorithm,
    SlicingCriterion,
};
use crate::features::summary::{run_summary_analysis, SummaryReport};
use crate::shared::models::{ArcGraph, ArcKind, GraphNode, NodeArena, NodeId, ParameterDirection};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

#[derive(Debug)]
struct Built {
    arena: NodeArena,
    graph: ArcGraph,
    /// Indexed by procedure id
    procedures: Vec<ProcedureDependenceGraph>,
    by_name: FxHashMap<String, usize>,
    call_graph: CallGraph,
    /// Pseudo-predicate → its executable successor
    pseudo_predicates: FxHashMap<NodeId, NodeId>,
    diagnostics: BuildSummary,
}

#[derive(Debug)]
pub struct SystemDependenceGraph {
    config: SdgConfig,
    built: Option<Built>,
}

impl SystemDependenceGraph {
    pub fn new(config: SdgConfig) -> Self {
        SystemDependenceGraph {
            config,
            built: None,
        }
    }

    pub fn config(&self) -> &SdgConfig {
        &self.config
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    /// Build from `program`, resolving calls by callee name
    pub fn build(&mut self, program: Program) -> Result<()> {
        let resolver = NameCallResolver::new(SymbolContext::from_program(&program));
        self.build_with_resolver(program, &resolver)
    }

    /// Build from `program` with a caller-supplied call resolver.
    ///
    /// Fails with `AlreadyBuilt` on a second call. On any error the SDG stays
    /// unbuilt.
    pub fn build_with_resolver(&mut self, program: Program, resolver: &dyn CallResolver) -> Result<()> {
        if self.built.is_some() {
            return Err(SdgError::AlreadyBuilt);
        }

        for (i, procedure) in program.procedures().iter().enumerate() {
            if procedure.id.index() != i {
                return Err(SdgError::malformed(format!(
                    "procedure '{}' has id {} at position {}",
                    procedure.name, procedure.id, i
                )));
            }
        }

        let resolved = resolve_call_sites(&program, resolver)?;

        let mut pseudo_predicates = FxHashMap::default();
        for procedure in program.procedures() {
            let cfg = &procedure.cfg;
            for n in cfg.nodes() {
                if let Some(target) = cfg.pseudo_predicate_target(n) {
                    pseudo_predicates.insert(n, target);
                }
            }
        }

        let (mut arena, procedures) = program.into_parts();
        let cd_config = self.config.control_dependence_config();
        let mut pdgs = Vec::with_capacity(procedures.len());
        for procedure in &procedures {
            pdgs.push(PdgAssembler::new(&mut arena, cd_config, &resolved).assemble(procedure)?);
        }

        let mut graph = ArcGraph::new();
        for pdg in &pdgs {
            graph.extend_from(pdg.graph());
        }
        let link = link_procedures(&pdgs, &mut graph);
        let call_graph = CallGraph::from_pdgs(&pdgs);
        let summary = run_summary_analysis(&pdgs, &mut graph, &call_graph, self.config.summary_config());

        let by_name = pdgs
            .iter()
            .enumerate()
            .map(|(i, pdg)| (pdg.name().to_string(), i))
            .collect();

        info!(
            procedures = pdgs.len(),
            nodes = graph.node_count(),
            arcs = graph.arc_count(),
            calls = link.calls,
            unresolved = link.unresolved,
            summary_arcs = summary.arcs_added,
            "system dependence graph built"
        );

        self.built = Some(Built {
            arena,
            graph,
            procedures: pdgs,
            by_name,
            call_graph,
            pseudo_predicates,
            diagnostics: BuildSummary {
                link,
                summary: Some(summary),
            },
        });
        Ok(())
    }

    fn built(&self) -> Result<&Built> {
        self.built.as_ref().ok_or(SdgError::NotBuilt)
    }

    /// Backward slice of `criterion` with the configured algorithm
    pub fn slice(&self, criterion: &SlicingCriterion) -> Result<Slice> {
        let built = self.built()?;
        if !built.graph.contains(criterion.node) {
            return Err(SdgError::NodeNotFound(criterion.clone()));
        }

        let config = self.config.slicing_config();
        let classic = ClassicSlicing;
        let pseudo = PseudoPredicateSlicing::new(&built.pseudo_predicates);
        let algorithm: &dyn SlicingAlgorithm = match config.algorithm {
            SlicingAlgorithmKind::Classic => &classic,
            SlicingAlgorithmKind::PseudoPredicate => &pseudo,
        };

        let nodes = algorithm.traverse(&built.graph, criterion, config);
        debug!(%criterion, algorithm = algorithm.name(), size = nodes.len(), "slice computed");
        Ok(Slice::new(criterion.clone(), nodes))
    }

    /// Slice several criteria in parallel; results keep the input order
    pub fn slice_many(&self, criteria: &[SlicingCriterion]) -> Vec<Result<Slice>> {
        criteria.par_iter().map(|c| self.slice(c)).collect()
    }

    /// Recompute summary arcs. After a converged build this adds nothing.
    pub fn run_summary_analysis(&mut self) -> Result<SummaryReport> {
        let summary_config = self.config.summary_config();
        let built = self.built.as_mut().ok_or(SdgError::NotBuilt)?;
        let report = run_summary_analysis(
            &built.procedures,
            &mut built.graph,
            &built.call_graph,
            summary_config,
        );
        built.diagnostics.summary = Some(report.clone());
        Ok(report)
    }

    pub fn stats(&self) -> Result<SdgStats> {
        let built = self.built()?;
        let mut stats = SdgStats {
            procedures: built.procedures.len(),
            nodes: built.graph.node_count(),
            unresolved_calls: built.diagnostics.link.unresolved,
            pseudo_predicates: built.pseudo_predicates.len(),
            recursive_procedures: built
                .call_graph
                .procedures()
                .into_iter()
                .filter(|&p| built.call_graph.is_recursive(p))
                .count(),
            ..SdgStats::default()
        };
        for (_, _, kind) in built.graph.arcs() {
            match kind {
                ArcKind::ControlDependence(_) => stats.control_dependence += 1,
                ArcKind::DataDependence(_) => stats.data_dependence += 1,
                ArcKind::Structural => stats.structural += 1,
                ArcKind::Call => stats.call += 1,
                ArcKind::ParameterInOut(ParameterDirection::Input) => stats.parameter_in += 1,
                ArcKind::ParameterInOut(ParameterDirection::Output) => stats.parameter_out += 1,
                ArcKind::Return => stats.returns += 1,
                ArcKind::Summary => stats.summary += 1,
                ArcKind::ControlFlow { .. } => {}
            }
        }
        Ok(stats)
    }

    pub fn diagnostics(&self) -> Result<&BuildSummary> {
        Ok(&self.built()?.diagnostics)
    }

    pub fn graph(&self) -> Result<&ArcGraph> {
        Ok(&self.built()?.graph)
    }

    pub fn call_graph(&self) -> Result<&CallGraph> {
        Ok(&self.built()?.call_graph)
    }

    pub fn pdgs(&self) -> Result<&[ProcedureDependenceGraph]> {
        Ok(&self.built()?.procedures)
    }

    pub fn pdg(&self, procedure: &str) -> Result<&ProcedureDependenceGraph> {
        let built = self.built()?;
        built
            .by_name
            .get(procedure)
            .and_then(|&i| built.procedures.get(i))
            .ok_or_else(|| SdgError::UnknownProcedure(procedure.to_string()))
    }

    pub fn node(&self, id: NodeId) -> Result<&GraphNode> {
        self.built()?.arena.node(id)
    }

    /// First non-synthetic node of `procedure` on source line `line`
    pub fn node_at_line(&self, procedure: &str, line: u32) -> Result<Option<NodeId>> {
        let built = self.built()?;
        let pdg = self.pdg(procedure)?;
        for id in pdg.nodes() {
            let node = built.arena.node(id)?;
            if !node.synthetic && node.line == Some(line) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Slice members with their labels, for display
    pub fn report(&self, slice: &Slice) -> Result<SliceReport> {
        let built = self.built()?;
        let mut nodes = Vec::with_capacity(slice.len());
        for id in slice.iter() {
            let node = built.arena.node(id)?;
            let procedure = built
                .procedures
                .get(node.procedure.index())
                .map(|p| p.name().to_string())
                .unwrap_or_default();
            nodes.push(SliceEntry {
                id,
                procedure,
                role: node.kind.as_str().to_string(),
                label: node.label.clone(),
                line: node.line,
                synthetic: node.synthetic,
            });
        }
        Ok(SliceReport {
            criterion: slice.criterion().clone(),
            algorithm: self.config.slicing_config().algorithm.as_str().to_string(),
            size: nodes.len(),
            nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preset, SummaryAlgorithm};
    use crate::features::flow_graph::ProgramBuilder;
    use crate::shared::models::{Signature, VariableAction};

    /// f(x) { y = 1; if (x > 0) y = 2; print(y); z = 3; }
    fn branching() -> (Program, [NodeId; 6]) {
        let mut program = ProgramBuilder::new();
        let mut f = program.procedure("f", Signature::new().parameter("x"));
        let y1 = f.statement("y = 1", [VariableAction::definition("y")]);
        let cond = f.statement("if (x > 0)", [VariableAction::usage("x")]);
        let y2 = f.statement("y = 2", [VariableAction::definition("y")]);
        let print = f.statement("print(y)", [VariableAction::usage("y")]);
        let z = f.statement("z = 3", [VariableAction::definition("z")]);
        let (entry, exit) = (f.entry(), f.exit());
        f.chain(&[entry, y1, cond, y2, print, z, exit]);
        f.flow(cond, print);
        f.set_line(print, 4).unwrap();
        f.finish().unwrap();
        (program.build(), [entry, y1, cond, y2, print, z])
    }

    fn built() -> (SystemDependenceGraph, [NodeId; 6]) {
        let (program, nodes) = branching();
        let mut sdg = SystemDependenceGraph::new(SdgConfig::default());
        sdg.build(program).unwrap();
        (sdg, nodes)
    }

    #[test]
    fn test_slice_of_branch_join() {
        let (sdg, [entry, y1, cond, y2, print, z]) = built();
        let slice = sdg.slice(&SlicingCriterion::node(print)).unwrap();
        for n in [entry, y1, cond, y2, print] {
            assert!(slice.contains(n), "missing {}", n);
        }
        assert!(!slice.contains(z));
    }

    #[test]
    fn test_second_build_is_rejected() {
        let (mut sdg, _) = built();
        let (program, _) = branching();
        assert!(matches!(sdg.build(program), Err(SdgError::AlreadyBuilt)));
    }

    #[test]
    fn test_slice_before_build() {
        let sdg = SystemDependenceGraph::new(SdgConfig::default());
        let err = sdg.slice(&SlicingCriterion::node(NodeId(0))).unwrap_err();
        assert!(matches!(err, SdgError::NotBuilt));
    }

    #[test]
    fn test_unknown_criterion_is_not_an_empty_slice() {
        let (sdg, _) = built();
        let missing = SlicingCriterion::node(NodeId(9999));
        match sdg.slice(&missing) {
            Err(SdgError::NodeNotFound(c)) => assert_eq!(c, missing),
            other => panic!("expected NodeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_is_folded_away() {
        let (program, _) = branching();
        let exit = program.procedures()[0].cfg.exit();
        let mut sdg = SystemDependenceGraph::new(SdgConfig::default());
        sdg.build(program).unwrap();
        assert!(matches!(
            sdg.slice(&SlicingCriterion::node(exit)),
            Err(SdgError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_failed_build_leaves_sdg_unbuilt() {
        use crate::features::flow_graph::{ControlFlowGraph, Procedure};
        use crate::shared::models::{NodeFactory, NodeKind, ProcedureId};

        let mut arena = NodeArena::new();
        let entry = arena.create_node(ProcedureId(0), NodeKind::Entry, "ENTER g".into());
        let exit = arena.create_node(ProcedureId(0), NodeKind::Exit, "EXIT g".into());
        let procedure = Procedure {
            id: ProcedureId(0),
            name: "g".into(),
            signature: Signature::new(),
            cfg: ControlFlowGraph::new(ProcedureId(0), entry, exit),
        };
        let mut sdg = SystemDependenceGraph::new(SdgConfig::default());
        let err = sdg.build(Program::new(arena, vec![procedure])).unwrap_err();
        assert!(matches!(err, SdgError::CfgNotBuilt(_)));
        assert!(!sdg.is_built());

        let (program, _) = branching();
        sdg.build(program).unwrap();
    }

    #[test]
    fn test_node_at_line_and_report() {
        let (sdg, [.., print, _]) = built();
        assert_eq!(sdg.node_at_line("f", 4).unwrap(), Some(print));
        assert_eq!(sdg.node_at_line("f", 99).unwrap(), None);
        assert!(matches!(
            sdg.node_at_line("nope", 4),
            Err(SdgError::UnknownProcedure(_))
        ));

        let slice = sdg.slice(&SlicingCriterion::node(print)).unwrap();
        let report = sdg.report(&slice).unwrap();
        assert_eq!(report.size, slice.len());
        assert!(report.nodes.iter().any(|e| e.label == "print(y)" && e.line == Some(4)));
        assert!(report.nodes.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_slice_many_matches_single_slices() {
        let (sdg, nodes) = built();
        let criteria: Vec<_> = nodes.iter().map(|&n| SlicingCriterion::node(n)).collect();
        let parallel = sdg.slice_many(&criteria);
        for (criterion, result) in criteria.iter().zip(parallel) {
            assert_eq!(result.unwrap(), sdg.slice(criterion).unwrap());
        }
    }

    #[test]
    fn test_stats_count_arcs() {
        let (sdg, _) = built();
        let stats = sdg.stats().unwrap();
        assert_eq!(stats.procedures, 1);
        assert!(stats.control_dependence > 0);
        assert!(stats.data_dependence > 0);
        assert_eq!(stats.call + stats.summary, 0);
        assert_eq!(stats.total_arcs(), sdg.graph().unwrap().arc_count());
    }

    #[test]
    fn test_presets_agree_on_simple_program() {
        let (program, [.., print, _]) = branching();
        let mut reference = SystemDependenceGraph::new(SdgConfig::default());
        reference.build(program).unwrap();
        let expected = reference.slice(&SlicingCriterion::node(print)).unwrap();

        for preset in [Preset::Fast, Preset::Thorough] {
            let (program, _) = branching();
            let config = SdgConfig::preset(preset)
                .summary(|c| c.algorithm(SummaryAlgorithm::Naive))
                .build()
                .unwrap();
            let mut sdg = SystemDependenceGraph::new(config);
            sdg.build(program).unwrap();
            assert_eq!(sdg.slice(&SlicingCriterion::node(print)).unwrap(), expected);
        }
    }
}
