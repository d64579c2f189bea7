use crate::Result;
use crate::diagnostics::ErrorLog;
use crate::edges::record::{Diagnostic, DiagnosticKind, EdgeRecord};
use crate::graph::{Graph, VertexId};

use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Outcome of parsing one edge list: every good tuple plus every skipped one.
#[derive(Debug, Clone, Default)]
pub struct ParsedEdges {
    pub records: Vec<EdgeRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the whole edge list text.
///
/// Expected shape (one bracketed list of 3-tuples):
/// ((1, 2, 0), (2, 3, 0), (1, 3, 1), (4, 0, -))
///
/// Bad tuples never abort the load; they come back as diagnostics.
pub fn parse_edge_list(text: &str) -> Result<ParsedEdges> {
    let mut out = ParsedEdges::default();
    for (i, raw) in split_tuples(text)?.into_iter().enumerate() {
        match parse_record(i + 1, raw) {
            Ok(record) => out.records.push(record),
            Err(diag) => out.diagnostics.push(diag),
        }
    }
    Ok(out)
}

/// Load a graph file, best effort.
///
/// Every skipped tuple and a missing or unreadable file end up in `log`; the
/// returned graph holds whatever could be loaded (possibly nothing).
pub fn load_graph_file(path: &Path, log: &mut ErrorLog) -> Graph {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log.record_lossy(format!("file {} not found", path.display()));
            return Graph::default();
        }
        Err(err) => {
            log.record_lossy(format!("cannot read {}: {}", path.display(), err));
            return Graph::default();
        }
    };

    let parsed = match parse_edge_list(&text) {
        Ok(parsed) => parsed,
        Err(err) => {
            log.record_lossy(format!("unexpected error in {}: {}", path.display(), err));
            return Graph::default();
        }
    };

    for diag in &parsed.diagnostics {
        log.record_lossy(diag.to_string());
    }
    debug!(
        "{}: {} tuples loaded, {} skipped",
        path.display(),
        parsed.records.len(),
        parsed.diagnostics.len()
    );

    Graph::from_records(parsed.records)
}

/// Strip the outer bracket and cut the list into tuple bodies.
///
/// Both `((a, b, n), (c, d, m))` and `(a, b, n), (c, d, m)` are accepted; the
/// bodies come back without their parentheses.
fn split_tuples(text: &str) -> Result<Vec<&str>> {
    const TUPLE_SEPARATOR_RE: &str = r"\)\s*,\s*\(";
    let re = Regex::new(TUPLE_SEPARATOR_RE)?;

    let text = text.trim();
    let inner = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(re
        .split(inner)
        .map(|body| body.trim().trim_start_matches('(').trim_end_matches(')'))
        .collect())
}

fn parse_record(index: usize, raw: &str) -> std::result::Result<EdgeRecord, Diagnostic> {
    let diag = |kind| Diagnostic {
        index,
        raw: raw.to_string(),
        kind,
    };

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [source, target, order] = parts[..] else {
        return Err(diag(DiagnosticKind::MissingFields));
    };
    if source.is_empty() || target.is_empty() || order.is_empty() {
        return Err(diag(DiagnosticKind::MissingFields));
    }

    if !is_digits(source) || !is_digits(target) {
        return Err(diag(DiagnosticKind::InvalidFields));
    }

    let order = if order == "-" {
        None
    } else if is_digits(order) {
        // Digits only, so the one way to fail is overflow.
        Some(
            order
                .parse::<u64>()
                .map_err(|_| diag(DiagnosticKind::InvalidFields))?,
        )
    } else {
        return Err(diag(DiagnosticKind::InvalidFields));
    };

    Ok(EdgeRecord {
        source: VertexId::new(source),
        target: VertexId::new(target),
        order,
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
