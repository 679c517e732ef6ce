//! SDG domain models

use crate::features::interprocedural::LinkStats;
use crate::features::summary::SummaryReport;
use serde::{Deserialize, Serialize};

/// SDG statistics: node count and arcs per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgStats {
    pub procedures: usize,
    pub nodes: usize,
    pub control_dependence: usize,
    pub data_dependence: usize,
    pub structural: usize,
    pub call: usize,
    pub parameter_in: usize,
    pub parameter_out: usize,
    pub returns: usize,
    pub summary: usize,
    pub unresolved_calls: usize,
    pub pseudo_predicates: usize,
    pub recursive_procedures: usize,
}

impl SdgStats {
    pub fn total_arcs(&self) -> usize {
        self.control_dependence
            + self.data_dependence
            + self.structural
            + self.call
            + self.parameter_in
            + self.parameter_out
            + self.returns
            + self.summary
    }
}

/// What the build pipeline did, kept for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub link: LinkStats,
    pub summary: Option<SummaryReport>,
}
