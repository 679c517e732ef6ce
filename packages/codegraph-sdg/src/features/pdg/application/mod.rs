//! PDG Application Layer
//!
//! Main entry point: `PdgAssembler::assemble()`

mod assembler;

pub use assembler::PdgAssembler;
