mod data_dependence;

pub use data_dependence::{build_data_dependence, reaching_actions};
