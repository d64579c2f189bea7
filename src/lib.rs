//! Operation graphs: load an edge list, check it, and derive its JSON
//! adjacency, its prefix expression and its numeric value.
//!
//! - [`edges`]: edge list parsing and best-effort loading
//! - [`graph`]: the adjacency store, cycle detection and sink location
//! - [`expr`]: expression building, the operation table and evaluation
//! - [`tasks`]: the end-to-end jobs the CLI runs

pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod expr;
pub mod graph;
pub mod tasks;

pub type Result<T> = anyhow::Result<T>;
