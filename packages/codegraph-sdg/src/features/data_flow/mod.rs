//! Data dependence by backward reaching-definition search.

pub mod infrastructure;

pub use infrastructure::{build_data_dependence, reaching_actions};
