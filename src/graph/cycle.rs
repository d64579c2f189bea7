//! Directed cycle detection (DFS with recursion-stack marks).
//!
//! The walk keeps its own frame stack, so chain length is bounded by heap
//! rather than by the thread stack.

use crate::graph::{Graph, VertexId};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl Graph {
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// The first closed cycle found, e.g. `[a, b, a]`.
    ///
    /// Starts a DFS from every still-unvisited vertex in first-seen order, so
    /// disconnected components are covered. Each vertex is visited once.
    pub fn find_cycle(&self) -> Option<Vec<VertexId>> {
        let mut marks = vec![Mark::Unvisited; self.len()];
        for start in 0..self.len() {
            if marks[start] == Mark::Unvisited {
                if let Some(cycle) = self.dfs(start, &mut marks) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn dfs(&self, start: usize, marks: &mut [Mark]) -> Option<Vec<VertexId>> {
        // (vertex, index of the next outgoing edge to try)
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        marks[start] = Mark::OnStack;

        while let Some(top) = frames.last_mut() {
            let (v, cursor) = *top;
            let Some(edge) = self.outgoing_at(v).get(cursor) else {
                frames.pop();
                marks[v] = Mark::Done;
                continue;
            };
            top.1 += 1;

            let Some(next) = self.position(edge.vertex.as_str()) else {
                continue;
            };
            match marks[next] {
                Mark::Unvisited => {
                    marks[next] = Mark::OnStack;
                    frames.push((next, 0));
                }
                Mark::OnStack => {
                    // Back edge: the cycle is the frame suffix starting at `next`.
                    let from = frames.iter().position(|&(p, _)| p == next).unwrap_or(0);
                    let mut cycle: Vec<VertexId> = frames[from..]
                        .iter()
                        .map(|&(p, _)| self.id_at(p).clone())
                        .collect();
                    cycle.push(self.id_at(next).clone());
                    return Some(cycle);
                }
                Mark::Done => {}
            }
        }
        None
    }
}
