//! Structural expression: rebuild the call tree from the sink by following
//! incoming edges in order-key order.

use crate::error::BuildError;
use crate::expr::Expr;
use crate::graph::{Graph, SinkPolicy, VertexId};

/// Written in place of the expression when no root can be chosen.
pub const BUILD_FAILURE: &str = "Unable to build function";

impl Graph {
    /// Expression rooted at `vertex`. A vertex the graph does not know is a leaf.
    ///
    /// Shared sources are expanded once per use, so the tree can be larger
    /// than the graph. Callers are expected to reject cyclic graphs up front;
    /// a cycle that slips through fails with `CycleDetected`.
    pub fn build_expr(&self, vertex: &str) -> Result<Expr, BuildError> {
        let Some(pos) = self.position(vertex) else {
            return Ok(Expr::Leaf(VertexId::new(vertex)));
        };
        let mut on_path = vec![false; self.len()];
        self.build_at(pos, &mut on_path)
    }

    fn build_at(&self, pos: usize, on_path: &mut [bool]) -> Result<Expr, BuildError> {
        let head = self.id_at(pos).clone();
        if on_path[pos] {
            return Err(BuildError::CycleDetected { vertex: head });
        }

        on_path[pos] = true;
        let args = self
            .sources_at(pos)
            .map(|src| self.build_at(src, on_path))
            .collect::<Result<Vec<_>, _>>();
        on_path[pos] = false;
        let args = args?;

        if args.is_empty() {
            Ok(Expr::Leaf(head))
        } else {
            Ok(Expr::Call { head, args })
        }
    }

    /// Prefix form of the whole graph, rooted at its sink.
    pub fn to_prefix_notation(&self, policy: SinkPolicy) -> Result<String, BuildError> {
        let root = self.root(policy)?;
        Ok(self.build_expr(root.as_str())?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::parse_edge_list;
    use pretty_assertions::assert_eq;

    fn graph(text: &str) -> Graph {
        Graph::from_records(parse_edge_list(text).unwrap().records)
    }

    #[test]
    fn builds_from_sink() {
        let g = graph("((1, 2, 0), (2, 3, 0), (1, 3, 1))");
        assert_eq!(g.to_prefix_notation(SinkPolicy::First).unwrap(), "3(2(1), 1)");
    }

    #[test]
    fn operands_follow_order_keys_not_file_order() {
        let g = graph("((7, 9, 2), (8, 9, 0), (6, 9, 1))");
        let expr = g.build_expr("9").unwrap();
        assert_eq!(expr.to_string(), "9(8, 6, 7)");

        let reparsed: Expr = expr.to_string().parse().unwrap();
        let heads: Vec<&str> = reparsed.args().iter().map(|a| a.head().as_str()).collect();
        let expected: Vec<&str> = g.incoming("9").iter().map(|e| e.vertex.as_str()).collect();
        assert_eq!(heads, expected);
    }

    #[test]
    fn shared_source_is_expanded_per_use() {
        // Shape: 1 -> 2, 1 -> 3, 2 + 3 -> 4
        let g = graph("((1, 2, 0), (1, 3, 1), (2, 4, 0), (3, 4, 1))");
        assert_eq!(g.to_prefix_notation(SinkPolicy::Unique).unwrap(), "4(2(1), 3(1))");
    }

    #[test]
    fn isolated_and_unknown_vertices_are_leaves() {
        let g = graph("((5, 0, -))");
        assert_eq!(g.to_prefix_notation(SinkPolicy::First).unwrap(), "5");
        assert_eq!(g.build_expr("42").unwrap(), Expr::Leaf(VertexId::new("42")));
    }

    #[test]
    fn missing_sink_is_a_build_failure() {
        assert_eq!(
            Graph::default().to_prefix_notation(SinkPolicy::First),
            Err(BuildError::NoSinkFound)
        );
    }

    #[test]
    fn cycle_behind_the_sink_does_not_hang() {
        // 3 is the sink, but 1 <-> 2 loops upstream of it.
        let g = graph("((1, 2, 0), (2, 1, 0), (2, 3, 0))");
        assert!(matches!(
            g.to_prefix_notation(SinkPolicy::First),
            Err(BuildError::CycleDetected { .. })
        ));
    }
}
