use super::traversal::two_phase;
use crate::config::SlicingConfig;
use crate::features::slicing::domain::SlicingCriterion;
use crate::features::slicing::ports::SlicingAlgorithm;
use crate::shared::models::{ArcGraph, NodeId};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Classic traversal that does not expand a pseudo-predicate once its
/// executable target is in the slice; the jump itself is still included.
#[derive(Debug, Clone, Copy)]
pub struct PseudoPredicateSlicing<'a> {
    /// Pseudo-predicate → its single executable successor
    targets: &'a FxHashMap<NodeId, NodeId>,
}

impl<'a> PseudoPredicateSlicing<'a> {
    pub fn new(targets: &'a FxHashMap<NodeId, NodeId>) -> Self {
        PseudoPredicateSlicing { targets }
    }
}

impl SlicingAlgorithm for PseudoPredicateSlicing<'_> {
    fn traverse(
        &self,
        graph: &ArcGraph,
        criterion: &SlicingCriterion,
        config: &SlicingConfig,
    ) -> BTreeSet<NodeId> {
        two_phase(graph, criterion, config, |n, included| {
            n == criterion.node
                || self
                    .targets
                    .get(&n)
                    .map_or(true, |target| !included.contains(target))
        })
    }

    fn name(&self) -> &'static str {
        "pseudo-predicate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::slicing::ClassicSlicing;
    use crate::shared::models::ArcKind;

    #[test]
    fn test_jump_with_included_target_is_not_expanded() {
        // 0 controls the jump 1 (target 3); 4 ← 3 ← 2 ← 1, so 3 is in first
        let mut g = ArcGraph::new();
        g.add_arc(NodeId(0), NodeId(1), ArcKind::control());
        g.add_arc(NodeId(1), NodeId(2), ArcKind::control());
        g.add_arc(NodeId(2), NodeId(3), ArcKind::Structural);
        g.add_arc(NodeId(3), NodeId(4), ArcKind::Structural);

        let targets: FxHashMap<NodeId, NodeId> = [(NodeId(1), NodeId(3))].into_iter().collect();
        let config = SlicingConfig::default();
        let criterion = SlicingCriterion::node(NodeId(4));

        let pruned = PseudoPredicateSlicing::new(&targets).traverse(&g, &criterion, &config);
        let classic = ClassicSlicing.traverse(&g, &criterion, &config);

        assert!(pruned.contains(&NodeId(1)));
        assert!(!pruned.contains(&NodeId(0)));
        assert!(classic.contains(&NodeId(0)));
        assert!(pruned.is_subset(&classic));
    }
}
