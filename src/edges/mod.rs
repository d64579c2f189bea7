//! Edge list input: the bracketed list of `(source, target, order)` tuples.

pub mod parse;
pub mod record;

pub use parse::{load_graph_file, parse_edge_list};
pub use record::{Diagnostic, DiagnosticKind, EdgeRecord};
