//! Numeric evaluation of the graph against an operation table.

use crate::error::{BuildError, EvalError};
use crate::expr::{Operation, OperationTable, Operator};
use crate::graph::{Graph, SinkPolicy, VertexId};

/// Evaluates vertices of one graph, memoizing every computed value.
///
/// Operands of a vertex are its incoming sources in order-key order. A
/// vertex whose entry is a literal is a leaf, whatever feeds into it.
pub struct Evaluator<'g> {
    graph: &'g Graph,
    table: &'g OperationTable,
    cache: Vec<Option<f64>>,
    on_path: Vec<bool>,
}

impl<'g> Evaluator<'g> {
    pub fn new(graph: &'g Graph, table: &'g OperationTable) -> Self {
        Self {
            graph,
            table,
            cache: vec![None; graph.len()],
            on_path: vec![false; graph.len()],
        }
    }

    pub fn evaluate(&mut self, vertex: &str) -> Result<f64, EvalError> {
        match self.graph.position(vertex) {
            Some(pos) => self.eval_at(pos),
            // Not in the graph: no operands can reach it.
            None => {
                let vertex = VertexId::new(vertex);
                match lookup(self.table, &vertex)? {
                    Step::Value(v) => Ok(v),
                    Step::Apply(op) => apply(&vertex, op, &[]),
                }
            }
        }
    }

    fn eval_at(&mut self, pos: usize) -> Result<f64, EvalError> {
        if let Some(v) = self.cache[pos] {
            return Ok(v);
        }

        let graph = self.graph;
        let vertex = graph.id_at(pos);
        if self.on_path[pos] {
            return Err(BuildError::CycleDetected {
                vertex: vertex.clone(),
            }
            .into());
        }

        let value = match lookup(self.table, vertex)? {
            Step::Value(v) => v,
            Step::Apply(op) => {
                self.on_path[pos] = true;
                let operands = graph
                    .sources_at(pos)
                    .map(|src| self.eval_at(src))
                    .collect::<Result<Vec<_>, _>>();
                // Cleared before `?` so a failed call leaves the evaluator reusable.
                self.on_path[pos] = false;
                apply(vertex, op, &operands?)?
            }
        };

        self.cache[pos] = Some(value);
        Ok(value)
    }
}

enum Step {
    Value(f64),
    Apply(Operator),
}

fn lookup(table: &OperationTable, vertex: &VertexId) -> Result<Step, EvalError> {
    match table.get(vertex.as_str()) {
        None => Err(EvalError::MissingOperationEntry {
            vertex: vertex.clone(),
        }),
        Some(Operation::Literal(v)) => Ok(Step::Value(*v)),
        Some(Operation::Operator(op)) => Ok(Step::Apply(*op)),
        Some(Operation::Symbol(token)) => Err(EvalError::UnknownOperator {
            vertex: vertex.clone(),
            operator: token.clone(),
        }),
    }
}

fn apply(vertex: &VertexId, op: Operator, operands: &[f64]) -> Result<f64, EvalError> {
    op.check_operands(vertex, operands.len())?;
    Ok(match op {
        Operator::Add => operands.iter().sum(),
        Operator::Multiply => operands.iter().product(),
        Operator::Exp => operands[0].exp(),
    })
}

/// Evaluate the graph at its sink.
pub fn evaluate_graph(
    graph: &Graph,
    table: &OperationTable,
    policy: SinkPolicy,
) -> Result<f64, EvalError> {
    let root = graph.root(policy)?;
    Evaluator::new(graph, table).evaluate(root.as_str())
}
