//! Front-end facing inputs
//!
//! - `program`: JSON description of procedures, statements and control flow

pub mod program;

pub use program::{
    ConditionalDescription, EdgeDescription, NodeDescription, NodeKeys, ProcedureDescription,
    ProgramDescription,
};
