/*
 * Codegraph SDG - Dependence Graph Engine and Program Slicer
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Node/arc vocabulary, node arena, arc graph storage
 * - features/    : Vertical slices (flow_graph → control_dependence → data_flow → pdg
 *                  → interprocedural → summary → slicing → sdg)
 * - config/      : Presets, stage configs, YAML schema
 * - api/         : JSON program description for front ends and the CLI
 *
 * Pipeline:
 * - CFG (front end) → PDG per procedure → SDG (call/param/return arcs)
 * - Summary arcs by call-graph fixed point
 * - Two-phase backward slicing over the finished SDG
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)] // SDG, PDG, CFG naming

pub mod api;
pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{Preset, SdgConfig};
pub use errors::{Result, SdgError};
pub use features::flow_graph::{ControlFlowGraph, ProcedureBuilder, Program, ProgramBuilder};
pub use features::sdg::{SdgStats, SystemDependenceGraph};
pub use features::slicing::{ProgramSlicer, Slice, SlicingCriterion};
pub use shared::models::{
    ActionKind, Argument, ArcKind, CallSite, GraphNode, NodeId, NodeKind, Parameter,
    ParameterMode, ProcedureId, Signature, VariableAction,
};
