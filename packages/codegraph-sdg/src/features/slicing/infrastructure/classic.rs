use super::traversal::two_phase;
use crate::config::SlicingConfig;
use crate::features::slicing::domain::SlicingCriterion;
use crate::features::slicing::ports::SlicingAlgorithm;
use crate::shared::models::{ArcGraph, NodeId};
use std::collections::BTreeSet;

/// Every reached node is expanded
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicSlicing;

impl SlicingAlgorithm for ClassicSlicing {
    fn traverse(
        &self,
        graph: &ArcGraph,
        criterion: &SlicingCriterion,
        config: &SlicingConfig,
    ) -> BTreeSet<NodeId> {
        two_phase(graph, criterion, config, |_, _| true)
    }

    fn name(&self) -> &'static str {
        "classic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ActionRef, ActionKind, ArcKind, DataDependence, ParameterDirection};

    fn dd(graph: &mut ArcGraph, from: u32, to: u32, variable: &str) {
        let dep = DataDependence::between(
            variable,
            ActionRef::new(NodeId(from), 0),
            ActionKind::Definition,
            ActionRef::new(NodeId(to), 0),
            ActionKind::Usage,
        )
        .unwrap();
        graph.add_arc(NodeId(from), NodeId(to), ArcKind::DataDependence(dep));
    }

    fn ids(nodes: &[u32]) -> BTreeSet<NodeId> {
        nodes.iter().map(|&n| NodeId(n)).collect()
    }

    #[test]
    fn test_follows_dependences_backward() {
        let mut g = ArcGraph::new();
        dd(&mut g, 1, 2, "a");
        dd(&mut g, 2, 3, "b");
        g.add_arc(NodeId(0), NodeId(1), ArcKind::control());
        dd(&mut g, 3, 4, "c");

        let slice = ClassicSlicing.traverse(&g, &SlicingCriterion::node(NodeId(3)), &SlicingConfig::default());
        assert_eq!(slice, ids(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_restricted_criterion_filters_its_data_arcs() {
        let mut g = ArcGraph::new();
        dd(&mut g, 1, 3, "a");
        dd(&mut g, 2, 3, "b");
        dd(&mut g, 0, 1, "b");

        let config = SlicingConfig::default();
        let slice = ClassicSlicing.traverse(&g, &SlicingCriterion::restricted(NodeId(3), "a"), &config);
        assert_eq!(slice, ids(&[0, 1, 3]));
    }

    #[test]
    fn test_thin_slice_skips_control() {
        let mut g = ArcGraph::new();
        g.add_arc(NodeId(0), NodeId(2), ArcKind::control());
        dd(&mut g, 1, 2, "a");

        let config = SlicingConfig::default().include_control(false);
        let slice = ClassicSlicing.traverse(&g, &SlicingCriterion::node(NodeId(2)), &config);
        assert_eq!(slice, ids(&[1, 2]));
    }

    #[test]
    fn test_max_depth_bounds_traversal() {
        let mut g = ArcGraph::new();
        dd(&mut g, 0, 1, "a");
        dd(&mut g, 1, 2, "a");
        dd(&mut g, 2, 3, "a");

        let config = SlicingConfig::default().max_depth(Some(2));
        let slice = ClassicSlicing.traverse(&g, &SlicingCriterion::node(NodeId(3)), &config);
        assert_eq!(slice, ids(&[1, 2, 3]));
    }

    #[test]
    fn test_phases_do_not_mix_call_directions() {
        // caller: 10 -call-> callee entry 20; 11 (actual-in) -param-in-> 21 (formal-in)
        // callee: 21 -dd-> 22 -dd-> 23 (formal-out) -param-out-> 12 (actual-out)
        // caller: 12 -dd-> 13
        let mut g = ArcGraph::new();
        g.add_arc(NodeId(10), NodeId(20), ArcKind::Call);
        g.add_arc(NodeId(20), NodeId(21), ArcKind::control());
        g.add_arc(NodeId(11), NodeId(21), ArcKind::ParameterInOut(ParameterDirection::Input));
        dd(&mut g, 21, 22, "p");
        dd(&mut g, 22, 23, "p");
        g.add_arc(NodeId(23), NodeId(12), ArcKind::ParameterInOut(ParameterDirection::Output));
        g.add_arc(NodeId(10), NodeId(11), ArcKind::Structural);
        g.add_arc(NodeId(10), NodeId(12), ArcKind::Structural);
        g.add_arc(NodeId(11), NodeId(12), ArcKind::Summary);
        dd(&mut g, 12, 13, "v");

        let config = SlicingConfig::default();
        let from_caller = ClassicSlicing.traverse(&g, &SlicingCriterion::node(NodeId(13)), &config);
        assert_eq!(from_caller, ids(&[10, 11, 12, 13, 20, 21, 22, 23]));

        // From inside the callee the walk ascends but never re-enters via param-out
        let from_callee = ClassicSlicing.traverse(&g, &SlicingCriterion::node(NodeId(22)), &config);
        assert_eq!(from_callee, ids(&[10, 11, 20, 21, 22]));
    }
}
