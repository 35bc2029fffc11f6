// src/lib.rs — Library root for heropick

pub mod catalog;
pub mod cli;
pub mod evaluator;
pub mod fuzzy;
pub mod infra;
pub mod store;
