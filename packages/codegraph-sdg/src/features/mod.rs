//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure data structures
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Algorithms behind the ports

pub mod control_dependence;
pub mod data_flow;
pub mod flow_graph;
pub mod interprocedural;
pub mod pdg;
pub mod sdg;
pub mod slicing;
pub mod summary;
