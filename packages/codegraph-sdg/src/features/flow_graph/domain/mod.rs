mod cfg;

pub use cfg::{ControlFlowGraph, Procedure, Program};
