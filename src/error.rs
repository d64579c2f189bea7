//! Error types for the structural and numeric derivations.

use crate::expr::{Arity, Operator};
use crate::graph::VertexId;
use thiserror::Error;

/// Failures that stop building an expression from a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Empty graph, or every vertex has outgoing edges.
    #[error("no sink vertex found")]
    NoSinkFound,

    #[error("graph has {} sinks: {}", sinks.len(), join(sinks))]
    MultipleSinks { sinks: Vec<VertexId> },

    /// A vertex was re-entered while still on the traversal path.
    #[error("cycle detected at vertex {vertex}")]
    CycleDetected { vertex: VertexId },
}

/// Failures of a single evaluation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("no operation entry for vertex {vertex}")]
    MissingOperationEntry { vertex: VertexId },

    #[error("operator '{operator}' at vertex {vertex} expects {expected} operand(s), got {found}")]
    WrongOperatorArity {
        vertex: VertexId,
        operator: Operator,
        expected: Arity,
        found: usize,
    },

    #[error("unknown operator '{operator}' for vertex {vertex}")]
    UnknownOperator { vertex: VertexId, operator: String },
}

fn join(ids: &[VertexId]) -> String {
    ids.iter()
        .map(VertexId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A call expression that could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed expression at byte {position}: {message}")]
pub struct ExprSyntaxError {
    pub position: usize,
    pub message: String,
}
