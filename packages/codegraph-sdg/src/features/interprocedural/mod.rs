//! Linking procedures into one system dependence graph.
//!
//! Call sites resolve through a [`CallResolver`]; resolved sites get call,
//! parameter and return arcs, unresolved ones are skipped and only show up
//! as missing arcs.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::resolve_call_sites;
pub use domain::{CallGraph, ResolvedCallee, ResolvedCalls};
pub use infrastructure::{link_procedures, LinkStats, NameCallResolver, ProcedureSymbol, SymbolContext};
pub use ports::{CallGraphProvider, CallResolver};
