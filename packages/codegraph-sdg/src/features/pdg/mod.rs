//! Procedure dependence graphs.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::PdgAssembler;
pub use domain::{CallSiteNodes, FormalNodes};
pub use infrastructure::ProcedureDependenceGraph;
