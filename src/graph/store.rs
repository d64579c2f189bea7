//! Adjacency store: vertex -> outgoing edges sorted by order key.

use crate::edges::EdgeRecord;
use crate::graph::VertexId;
use std::collections::HashMap;
use std::fmt;

/// An edge as seen from one endpoint. In an outgoing list `vertex` is the
/// target; in an incoming list it is the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub vertex: VertexId,
    pub order: u64,
}

impl Edge {
    pub fn new(vertex: impl Into<String>, order: u64) -> Self {
        Self {
            vertex: VertexId::new(vertex),
            order,
        }
    }
}

/// Immutable directed graph built once at load time.
///
/// Vertices keep first-seen order. Every outgoing and incoming list is sorted
/// ascending by order key; equal keys keep file order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    ids: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
}

impl Graph {
    /// Build from parsed tuples.
    ///
    /// A record with an order key registers both endpoints and adds the edge.
    /// A record without one (`-`) registers only its source.
    pub fn from_records(records: impl IntoIterator<Item = EdgeRecord>) -> Self {
        let mut graph = Graph::default();
        for record in records {
            let source = graph.intern(record.source);
            if let Some(order) = record.order {
                graph.intern(record.target.clone());
                graph.outgoing[source].push(Edge {
                    vertex: record.target,
                    order,
                });
            }
        }
        graph.finish()
    }

    /// Build from an explicit adjacency listing, keys first in listed order.
    pub fn from_adjacency(entries: Vec<(VertexId, Vec<Edge>)>) -> Self {
        let mut graph = Graph::default();
        for (id, _) in &entries {
            graph.intern(id.clone());
        }
        for (id, edges) in entries {
            let source = graph.intern(id);
            for edge in edges {
                graph.intern(edge.vertex.clone());
                graph.outgoing[source].push(edge);
            }
        }
        graph.finish()
    }

    fn intern(&mut self, id: VertexId) -> usize {
        if let Some(&pos) = self.index.get(&id) {
            return pos;
        }
        let pos = self.ids.len();
        self.index.insert(id.clone(), pos);
        self.ids.push(id);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        pos
    }

    fn finish(mut self) -> Self {
        for edges in &mut self.outgoing {
            edges.sort_by_key(|e| e.order);
        }

        // Same order a full scan over every outgoing list would produce.
        for (pos, edges) in self.outgoing.iter().enumerate() {
            for edge in edges {
                let target = self.index[&edge.vertex];
                self.incoming[target].push(Edge {
                    vertex: self.ids[pos].clone(),
                    order: edge.order,
                });
            }
        }
        for edges in &mut self.incoming {
            edges.sort_by_key(|e| e.order);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, vertex: &str) -> bool {
        self.index.contains_key(vertex)
    }

    /// Vertices in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = &VertexId> {
        self.ids.iter()
    }

    /// `(vertex, outgoing edges)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&VertexId, &[Edge])> {
        self.ids
            .iter()
            .zip(self.outgoing.iter().map(Vec::as_slice))
    }

    /// Outgoing edges of `vertex`; empty for sinks and unknown vertices.
    pub fn outgoing(&self, vertex: &str) -> &[Edge] {
        self.position(vertex)
            .map(|pos| self.outgoing[pos].as_slice())
            .unwrap_or_default()
    }

    /// Incoming edges of `vertex` (edge `vertex` = source), sorted by order key.
    pub fn incoming(&self, vertex: &str) -> &[Edge] {
        self.position(vertex)
            .map(|pos| self.incoming[pos].as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn position(&self, vertex: &str) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    pub(crate) fn id_at(&self, pos: usize) -> &VertexId {
        &self.ids[pos]
    }

    pub(crate) fn outgoing_at(&self, pos: usize) -> &[Edge] {
        &self.outgoing[pos]
    }

    /// Positions of the sources feeding `pos`, in operand order.
    pub(crate) fn sources_at(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        self.incoming[pos]
            .iter()
            .filter_map(|e| self.position(e.vertex.as_str()))
    }
}

/// Same vertex set and identical per-vertex lists; vertex order is ignored.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(id, edges)| other.contains(id.as_str()) && other.outgoing(id.as_str()) == edges)
    }
}

impl Eq for Graph {}

/// One line per vertex: `vertex 1: [(2, 0), (3, 1)]`.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, edges) in self.iter() {
            let edges = edges
                .iter()
                .map(|e| format!("({}, {})", e.vertex, e.order))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "vertex {}: [{}]", id, edges)?;
        }
        Ok(())
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
    fn builds_sorted_adjacency() {
        let g = graph("((1, 3, 1), (2, 3, 0), (1, 2, 0))");

        assert_eq!(
            g.vertices().map(VertexId::as_str).collect::<Vec<_>>(),
            vec!["1", "3", "2"]
        );
        assert_eq!(g.outgoing("1"), &[Edge::new("2", 0), Edge::new("3", 1)]);
        assert_eq!(g.outgoing("2"), &[Edge::new("3", 0)]);
        assert!(g.outgoing("3").is_empty());
    }

    #[test]
    fn equal_keys_keep_file_order() {
        let g = graph("((1, 5, 2), (1, 4, 2), (1, 3, 1))");
        assert_eq!(
            g.outgoing("1"),
            &[Edge::new("3", 1), Edge::new("5", 2), Edge::new("4", 2)]
        );
    }

    #[test]
    fn incoming_edges_are_ordered_by_key() {
        let g = graph("((7, 9, 2), (8, 9, 0), (6, 9, 1))");
        assert_eq!(
            g.incoming("9"),
            &[Edge::new("8", 0), Edge::new("6", 1), Edge::new("7", 2)]
        );
        assert!(g.incoming("7").is_empty());
    }

    #[test]
    fn absent_order_registers_source_only() {
        let g = graph("((1, 2, 0), (5, 6, -))");
        assert!(g.contains("5"));
        assert!(!g.contains("6"));
        assert!(g.outgoing("5").is_empty());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn equality_ignores_vertex_order() {
        let a = graph("((1, 2, 0), (3, 2, 1))");
        let b = Graph::from_adjacency(vec![
            (VertexId::new("3"), vec![Edge::new("2", 1)]),
            (VertexId::new("2"), vec![]),
            (VertexId::new("1"), vec![Edge::new("2", 0)]),
        ]);
        assert_eq!(a, b);
        assert_ne!(a, graph("((1, 2, 0), (3, 2, 2))"));
    }

    #[test]
    fn display_lists_every_vertex() {
        let g = graph("((1, 2, 0), (2, 3, 0), (1, 3, 1))");
        assert_eq!(
            g.to_string(),
            "vertex 1: [(2, 0), (3, 1)]\nvertex 2: [(3, 0)]\nvertex 3: []\n"
        );
    }
}
