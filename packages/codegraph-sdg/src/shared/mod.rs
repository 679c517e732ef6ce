//! Shared kernel: the node and arc vocabulary every feature speaks.

pub mod models;
