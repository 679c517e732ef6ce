mod pdg;

pub use pdg::ProcedureDependenceGraph;
