use crate::graph::VertexId;
use std::fmt;

/// One successfully parsed `(source, target, order)` tuple.
///
/// `order == None` is the `-` marker: the source is registered as a vertex,
/// no edge is created and the target is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: VertexId,
    pub target: VertexId,
    pub order: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Not exactly three non-empty fields.
    MissingFields,
    /// Non-numeric endpoint, or an order key that is neither digits nor `-`.
    InvalidFields,
}

/// A tuple that was skipped, with its 1-based position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub index: usize,
    pub raw: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.kind {
            DiagnosticKind::MissingFields => "missing data",
            DiagnosticKind::InvalidFields => "invalid data",
        };
        write!(f, "tuple {}: '({})' - {}", self.index, self.raw, reason)
    }
}
