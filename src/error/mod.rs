// src/error/mod.rs
//
// Error taxonomy for the data core.
//
// Infrastructure failures inside a workflow transaction trigger rollback
// and are converted to a boolean/None result at the service boundary;
// read operations treat zero rows as a normal empty result.

pub mod types;

pub use types::{AppError, AppResult};
