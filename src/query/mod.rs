// src/query/mod.rs
//
// Query construction: the filter/sort DSL and statement text generation.

pub mod builder;
pub mod filter;

pub use filter::{FilterCondition, Relation, SortKey};
