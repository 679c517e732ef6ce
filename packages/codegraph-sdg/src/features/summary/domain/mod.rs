//! Summary domain models

use crate::config::SummaryAlgorithm;
use crate::shared::models::{NodeId, ProcedureId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// (formal-in, formal-out) pairs per procedure, formal-out including the return node
pub type SummaryPairs = FxHashMap<ProcedureId, FxHashSet<(NodeId, NodeId)>>;

/// Result of one pair computation
#[derive(Debug, Clone, Default)]
pub struct SummaryOutcome {
    pub pairs: SummaryPairs,
    /// Procedure visits performed
    pub iterations: usize,
    /// False when the iteration bound cut the analysis short
    pub converged: bool,
}

impl SummaryOutcome {
    pub fn pair_count(&self) -> usize {
        self.pairs.values().map(|p| p.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub algorithm: SummaryAlgorithm,
    pub iterations: usize,
    pub converged: bool,
    pub pairs: usize,
    pub arcs_added: usize,
}
