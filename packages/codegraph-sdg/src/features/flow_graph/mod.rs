//! Control flow graphs handed over by a front end.
//!
//! The engine never builds CFGs from source; `ProgramBuilder` is the seam a
//! front end (or a test) uses to describe them.

pub mod domain;
pub mod infrastructure;

pub use domain::{ControlFlowGraph, Procedure, Program};
pub use infrastructure::{ProcedureBuilder, ProgramBuilder};
