mod classic;
mod pseudo_predicate;
mod traversal;

pub use classic::ClassicSlicing;
pub use pseudo_predicate::PseudoPredicateSlicing;
