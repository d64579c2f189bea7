//! Operation-aware textual form, e.g. `(2 + exp(1))`.

use crate::error::{BuildError, EvalError};
use crate::expr::{Operation, OperationTable, Operator};
use crate::graph::{Graph, SinkPolicy};

/// Render the graph at its sink with operators spelled out.
///
/// Literals print as numbers, `add`/`multiply` as infix groups, `exp` as a
/// call. An unknown token prints as itself and a vertex without an entry as
/// its own name; neither is an error here.
pub fn render_with_operations(
    graph: &Graph,
    table: &OperationTable,
    policy: SinkPolicy,
) -> Result<String, EvalError> {
    let root = graph.root(policy)?;
    let Some(pos) = graph.position(root.as_str()) else {
        return Ok(root.to_string());
    };
    let mut on_path = vec![false; graph.len()];
    render_at(graph, table, pos, &mut on_path)
}

fn render_at(
    graph: &Graph,
    table: &OperationTable,
    pos: usize,
    on_path: &mut [bool],
) -> Result<String, EvalError> {
    let vertex = graph.id_at(pos);
    let op = match table.get(vertex.as_str()) {
        None => return Ok(vertex.to_string()),
        Some(Operation::Literal(v)) => return Ok(v.to_string()),
        Some(Operation::Symbol(token)) => return Ok(token.clone()),
        Some(Operation::Operator(op)) => *op,
    };

    if on_path[pos] {
        return Err(BuildError::CycleDetected {
            vertex: vertex.clone(),
        }
        .into());
    }
    on_path[pos] = true;
    let operands = graph
        .sources_at(pos)
        .map(|src| render_at(graph, table, src, on_path))
        .collect::<Result<Vec<_>, _>>();
    on_path[pos] = false;
    let operands = operands?;

    op.check_operands(vertex, operands.len())?;
    Ok(match op {
        Operator::Add => format!("({})", operands.join(" + ")),
        Operator::Multiply if operands.is_empty() => "1".to_string(),
        Operator::Multiply => format!("({})", operands.join(" * ")),
        Operator::Exp => format!("exp({})", operands[0]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::parse_edge_list;
    use crate::expr::{Arity, parse_operation_table};
    use crate::graph::VertexId;
    use pretty_assertions::assert_eq;

    fn graph(text: &str) -> Graph {
        Graph::from_records(parse_edge_list(text).unwrap().records)
    }

    fn table(text: &str) -> OperationTable {
        parse_operation_table(text).unwrap().table
    }

    #[test]
    fn renders_nested_operators() {
        let g = graph("((1, 4, 0), (2, 4, 1), (3, 5, 0), (4, 5, 1), (5, 6, 0))");
        let t = table("{\n1: 2,\n2: 1.5,\n3: 10,\n4: multiply,\n5: add,\n6: exp\n}");
        assert_eq!(
            render_with_operations(&g, &t, SinkPolicy::Unique).unwrap(),
            "exp((10 + (2 * 1.5)))"
        );
    }

    #[test]
    fn unknown_and_missing_entries_print_verbatim() {
        let g = graph("((1, 3, 0), (2, 3, 1))");
        let t = table("1: sin\n3: +");
        assert_eq!(
            render_with_operations(&g, &t, SinkPolicy::First).unwrap(),
            "(sin + 2)"
        );
    }

    #[test]
    fn exp_arity_is_checked() {
        let g = graph("((1, 3, 0), (2, 3, 1))");
        let t = table("1: 1\n2: 2\n3: exp");
        assert_eq!(
            render_with_operations(&g, &t, SinkPolicy::First),
            Err(EvalError::WrongOperatorArity {
                vertex: VertexId::new("3"),
                operator: Operator::Exp,
                expected: Arity::Exactly(1),
                found: 2,
            })
        );
    }
}
