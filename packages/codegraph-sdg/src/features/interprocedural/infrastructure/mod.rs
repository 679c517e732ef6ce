mod linker;
mod resolver;

pub use linker::{link_procedures, LinkStats};
pub use resolver::{NameCallResolver, ProcedureSymbol, SymbolContext};
