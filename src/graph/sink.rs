//! Sink location: the root of the derived expression.

use crate::error::BuildError;
use crate::graph::{Graph, VertexId};
use tracing::warn;

/// What to do when more than one vertex has no outgoing edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkPolicy {
    /// Use the first sink in load order and warn about the rest.
    #[default]
    First,
    /// Refuse to pick: more than one sink is a build failure.
    Unique,
}

impl Graph {
    /// Vertices with an empty outgoing list, in first-seen order.
    pub fn sinks(&self) -> impl Iterator<Item = &VertexId> {
        self.iter()
            .filter(|(_, edges)| edges.is_empty())
            .map(|(id, _)| id)
    }

    pub fn find_sink(&self) -> Option<&VertexId> {
        self.sinks().next()
    }

    /// The sink to build from, according to `policy`.
    pub fn root(&self, policy: SinkPolicy) -> Result<&VertexId, BuildError> {
        let sinks: Vec<&VertexId> = self.sinks().collect();
        match (sinks.as_slice(), policy) {
            ([], _) => Err(BuildError::NoSinkFound),
            ([only], _) => Ok(*only),
            ([first, rest @ ..], SinkPolicy::First) => {
                warn!(
                    "graph has {} sinks, using {} (ignored: {})",
                    sinks.len(),
                    first,
                    rest.iter()
                        .map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                Ok(*first)
            }
            (_, SinkPolicy::Unique) => Err(BuildError::MultipleSinks {
                sinks: sinks.into_iter().cloned().collect(),
            }),
        }
    }
}
