//! JSON adjacency form: `{"1": [["2", 0], ["3", 1]], "2": [["3", 0]], "3": []}`.
//!
//! Serialization walks vertices in load order, so the document lists them the
//! way the input did. Deserialization keeps document order as well.

use crate::Result;
use crate::graph::{Edge, Graph, VertexId};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.vertex.as_str(), self.order).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (vertex, order) = <(String, u64)>::deserialize(deserializer)?;
        Ok(Edge::new(vertex, order))
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, edges) in self.iter() {
            map.serialize_entry(id.as_str(), edges)?;
        }
        map.end()
    }
}

struct GraphVisitor;

impl<'de> Visitor<'de> for GraphVisitor {
    type Value = Graph;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping vertex ids to [target, order] lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Graph, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((id, edges)) = access.next_entry::<String, Vec<Edge>>()? {
            entries.push((VertexId::new(id), edges));
        }
        Ok(Graph::from_adjacency(entries))
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(GraphVisitor)
    }
}

impl Graph {
    /// Pretty JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn from_json(text: &str) -> Result<Graph> {
        Ok(serde_json::from_str(text)?)
    }
}
