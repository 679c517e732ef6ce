//! Slicing Ports

use crate::config::SlicingConfig;
use crate::features::slicing::domain::SlicingCriterion;
use crate::shared::models::{ArcGraph, NodeId};
use std::collections::BTreeSet;

/// Backward traversal from a criterion.
///
/// The criterion node is known to be in `graph`; the result always contains it.
///
/// # Implementors
/// - `ClassicSlicing` (infrastructure/classic.rs)
/// - `PseudoPredicateSlicing` (infrastructure/pseudo_predicate.rs)
pub trait SlicingAlgorithm: Send + Sync {
    fn traverse(
        &self,
        graph: &ArcGraph,
        criterion: &SlicingCriterion,
        config: &SlicingConfig,
    ) -> BTreeSet<NodeId>;

    fn name(&self) -> &'static str;
}
