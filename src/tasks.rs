//! The three end-to-end jobs behind the CLI subcommands.
//!
//! A job fails on its own: callers running several jobs keep going after one
//! returns `Err`.

use crate::Result;
use crate::diagnostics::ErrorLog;
use crate::edges::load_graph_file;
use crate::expr::{BUILD_FAILURE, evaluate_graph, load_operation_file, render_with_operations};
use crate::graph::{Graph, SinkPolicy};

use anyhow::{Context, bail};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Load `input`, log its adjacency and write the JSON document to `output`.
pub fn write_graph_json(input: &Path, output: &Path) -> Result<()> {
    let mut log = ErrorLog::for_input(input);
    let graph = load_graph_file(input, &mut log);
    display(input, &graph);

    let json = graph
        .to_json_pretty()
        .with_context(|| format!("serialize graph from {}", input.display()))?;
    fs::write(output, json).with_context(|| format!("write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

/// Load `input` and write its prefix expression to `output`.
///
/// A cyclic graph writes nothing. A graph without a usable sink writes
/// [`BUILD_FAILURE`]. Both count as a failed job.
pub fn write_prefix(input: &Path, output: &Path, policy: SinkPolicy) -> Result<()> {
    let mut log = ErrorLog::for_input(input);
    let graph = load_graph_file(input, &mut log);
    display(input, &graph);
    refuse_cycles(input, &graph)?;

    let (text, outcome) = match graph.to_prefix_notation(policy) {
        Ok(prefix) => (prefix, Ok(())),
        Err(err) => {
            log.record_lossy(format!("cannot build expression: {}", err));
            (BUILD_FAILURE.to_string(), Err(err))
        }
    };
    info!("prefix notation of {}: {}", input.display(), text);

    fs::write(output, &text).with_context(|| format!("write {}", output.display()))?;
    info!("wrote {}", output.display());
    outcome.with_context(|| format!("build expression for {}", input.display()))
}

/// Load the graph and its operation table, evaluate at the sink and write
/// the number to `output`.
pub fn write_evaluation(
    graph_input: &Path,
    ops_input: &Path,
    output: &Path,
    policy: SinkPolicy,
) -> Result<()> {
    let mut log = ErrorLog::for_input(graph_input);
    let graph = load_graph_file(graph_input, &mut log);
    let table = load_operation_file(ops_input);
    refuse_cycles(graph_input, &graph)?;

    match graph.to_prefix_notation(policy) {
        Ok(prefix) => info!("prefix notation: {}", prefix),
        Err(err) => warn!("prefix notation unavailable: {}", err),
    }
    match render_with_operations(&graph, &table, policy) {
        Ok(text) => info!("function with operations: {}", text),
        Err(err) => warn!("function with operations unavailable: {}", err),
    }

    let value = match evaluate_graph(&graph, &table, policy) {
        Ok(value) => value,
        Err(err) => {
            log.record_lossy(format!("evaluation failed: {}", err));
            return Err(err).with_context(|| format!("evaluate {}", graph_input.display()));
        }
    };
    info!("result: {}", value);

    fs::write(output, value.to_string()).with_context(|| format!("write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn display(input: &Path, graph: &Graph) {
    info!(
        "{}: {} vertices, {} edges",
        input.display(),
        graph.len(),
        graph.edge_count()
    );
    for line in graph.to_string().lines() {
        info!("{}", line);
    }
}

fn refuse_cycles(input: &Path, graph: &Graph) -> Result<()> {
    if let Some(cycle) = graph.find_cycle() {
        let path = cycle
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        error!("cycle detected in {}: {}", input.display(), path);
        bail!("graph {} contains a cycle: {}", input.display(), path);
    }
    info!("no cycles in {}", input.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefix_job_writes_expression() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "((1, 2, 0), (2, 3, 0), (1, 3, 1))").unwrap();

        write_prefix(&input, &output, SinkPolicy::First).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "3(2(1), 1)");
    }

    #[test]
    fn prefix_job_refuses_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "((1, 2, 0), (2, 1, 0))").unwrap();

        assert!(write_prefix(&input, &output, SinkPolicy::First).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn prefix_job_writes_failure_text_without_sink() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.txt");
        let output = dir.path().join("out.txt");

        assert!(write_prefix(&input, &output, SinkPolicy::First).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), BUILD_FAILURE);
    }

    #[test]
    fn evaluation_job_writes_number() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.txt");
        let ops = dir.path().join("ops.txt");
        let output = dir.path().join("result.txt");
        fs::write(&input, "((1, 3, 0), (2, 3, 1))").unwrap();
        fs::write(&ops, "{\n1: 2,\n2: 3,\n3: add\n}\n").unwrap();

        write_evaluation(&input, &ops, &output, SinkPolicy::First).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "5");
    }

    #[test]
    fn evaluation_failure_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("g.txt");
        let ops = dir.path().join("ops.txt");
        let output = dir.path().join("result.txt");
        fs::write(&input, "((1, 3, 0), (2, 3, 1))").unwrap();
        fs::write(&ops, "1: 2\n2: 3\n3: exp\n").unwrap();

        let err = write_evaluation(&input, &ops, &output, SinkPolicy::First).unwrap_err();
        assert!(format!("{:#}", err).contains("exp"), "{:#}", err);
        assert!(!output.exists());

        let logged = fs::read_to_string(dir.path().join("error_g.txt")).unwrap();
        assert!(logged.starts_with("evaluation failed:"), "{}", logged);
        assert!(logged.contains("vertex 3"), "{}", logged);
    }
}
