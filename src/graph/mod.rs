//! Graph layer: adjacency store and the structural checks run over it.
//!
//! - `store`: the immutable adjacency map, built once from parsed tuples
//! - `cycle`: directed cycle detection
//! - `sink`: root (sink) location
//! - `json`: the JSON adjacency document

pub mod cycle;
pub mod json;
pub mod sink;
pub mod store;
pub mod vertex;

pub use sink::SinkPolicy;
pub use store::{Edge, Graph};
pub use vertex::VertexId;
