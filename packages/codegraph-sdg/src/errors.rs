//! Error types for codegraph-sdg
//!
//! Configuration and programmer errors abort the operation that raised them
//! and leave the graph untouched. Resolution gaps (unresolved calls) are not
//! errors at all; they only show up as missing arcs.

use crate::config::ConfigError;
use crate::features::slicing::SlicingCriterion;
use crate::shared::models::NodeId;
use thiserror::Error;

/// Main error type for dependence-graph construction and slicing
#[derive(Debug, Error)]
pub enum SdgError {
    /// `build` called on an SDG that already holds a program
    #[error("System dependence graph is already built; build may be called only once")]
    AlreadyBuilt,

    /// Slicing or summary analysis requested before `build`
    #[error("System dependence graph is not built yet")]
    NotBuilt,

    /// A procedure was handed over with a CFG that was never finished
    #[error("Control flow graph of procedure '{0}' is not built")]
    CfgNotBuilt(String),

    /// Internal graph consistency violation
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    /// Data dependence between two actions that cannot depend on each other
    #[error("Malformed data dependence on '{variable}': {source_kind} cannot reach {target_kind}")]
    MalformedDataDependence {
        variable: String,
        source_kind: &'static str,
        target_kind: &'static str,
    },

    /// Criterion node absent from the graph
    #[error("Slicing criterion not found in graph: {0}")]
    NodeNotFound(SlicingCriterion),

    /// Node id that does not belong to the arena
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Procedure name that no procedure carries
    #[error("Unknown procedure '{0}'")]
    UnknownProcedure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (program descriptions, reports)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SdgError {
    /// Create a malformed-graph error
    pub fn malformed(msg: impl Into<String>) -> Self {
        SdgError::MalformedGraph(msg.into())
    }
}

/// Result type alias for SDG operations
pub type Result<T> = std::result::Result<T, SdgError>;
