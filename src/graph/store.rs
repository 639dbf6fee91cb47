//! In-memory graph storage
//!
//! A [`GraphStore`] is built once from a batch of loader records and is
//! immutable for the lifetime of every read query. Uses an
//! insertion-ordered node registry plus a physical edge list:
//! - nodes: canonical id -> incident physical-edge ids (adjacency)
//! - edges: physical edges in load order
//! - groups: node slot -> externally supplied partition label

use super::name;
use super::query::GraphQuery;
use super::types::{
    Adjacency, DistinctEdge, EdgeRecord, GraphKind, GroupRecord, NodeMetadata,
};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building or deriving a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge row carried a weight value that does not parse as a
    /// float. Absent weights default instead; see [`DEFAULT_WEIGHT`].
    #[error("edge record {row}: malformed weight {value:?}")]
    MalformedWeight { row: usize, value: String },

    /// A perturbation asked for more nodes than the graph holds.
    #[error("not enough nodes: needed {needed}, graph has {available}")]
    NotEnoughNodes { needed: usize, available: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Weight assumed for edge rows whose weight column is absent.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One physical undirected edge, endpoints as node slots.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    pub label: Option<String>,
}

/// In-memory weighted undirected graph with an external group partition.
#[derive(Debug, Clone)]
pub struct GraphStore {
    kind: GraphKind,
    /// Canonical id -> ids of incident physical edges. Each parallel
    /// edge appears individually; each edge appears in both endpoint
    /// lists.
    nodes: IndexMap<String, Vec<usize>>,
    /// Physical edges in load order.
    edges: Vec<StoredEdge>,
    /// Node slot -> group label, only for nodes named by a group record.
    groups: FxHashMap<usize, String>,
}

impl GraphStore {
    /// Build a store from loader records.
    ///
    /// Every edge row contributes both directions to adjacency. Nodes
    /// are created implicitly by the records that mention them;
    /// group-only nodes with no edges are valid and participate in
    /// group statistics. Rows with an empty endpoint or a self-loop are
    /// skipped. A present but non-numeric weight aborts the build.
    pub fn build(
        kind: GraphKind,
        edge_records: &[EdgeRecord],
        group_records: &[GroupRecord],
    ) -> GraphResult<GraphStore> {
        let mut store = GraphStore {
            kind,
            nodes: IndexMap::new(),
            edges: Vec::with_capacity(edge_records.len()),
            groups: FxHashMap::default(),
        };

        let mut skipped = 0usize;
        for (row, record) in edge_records.iter().enumerate() {
            let origin = name::normalize(&record.origin);
            let destination = name::normalize(&record.destination);

            if origin.is_empty() || destination.is_empty() || origin == destination {
                skipped += 1;
                continue;
            }

            let weight = match record.weight.as_deref() {
                None => DEFAULT_WEIGHT,
                Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                    GraphError::MalformedWeight {
                        row,
                        value: raw.to_string(),
                    }
                })?,
            };

            let from = store.intern(origin);
            let to = store.intern(destination);
            let edge = store.edges.len();
            store.edges.push(StoredEdge {
                from,
                to,
                weight,
                label: record
                    .label
                    .as_deref()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
            });
            store.attach(from, edge);
            store.attach(to, edge);
        }

        for record in group_records {
            let node = name::normalize(&record.node);
            if node.is_empty() {
                continue;
            }
            let slot = store.intern(node);
            store.groups.insert(slot, record.group.trim().to_string());
        }

        debug!(
            kind = %store.kind,
            nodes = store.nodes.len(),
            edges = store.edges.len(),
            skipped,
            "graph built"
        );

        Ok(store)
    }

    fn intern(&mut self, id: String) -> usize {
        let entry = self.nodes.entry(id);
        let slot = entry.index();
        entry.or_default();
        slot
    }

    fn attach(&mut self, slot: usize, edge: usize) {
        if let Some((_, incident)) = self.nodes.get_index_mut(slot) {
            incident.push(edge);
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Number of stored adjacency entries for a node, counting parallel
    /// edges individually. `None` for an unknown node.
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.nodes.get(&name::normalize(id)).map(Vec::len)
    }

    /// Group label of a node, if it has one.
    pub fn group_of(&self, id: &str) -> Option<&str> {
        let slot = self.nodes.get_index_of(&name::normalize(id))?;
        self.groups.get(&slot).map(String::as_str)
    }

    /// Distinct group labels in lexicographic order.
    pub fn groups_sorted(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.groups.values().cloned().collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Per-node metadata rows in canonical node order.
    pub fn metadata(&self) -> Vec<NodeMetadata> {
        self.nodes_sorted()
            .into_iter()
            .map(|id| {
                let slot = self.nodes.get_index_of(&id);
                NodeMetadata {
                    degree: slot.map_or(0, |s| self.nodes[s].len()),
                    group: slot.and_then(|s| self.groups.get(&s).cloned()),
                    id,
                }
            })
            .collect()
    }

    pub(crate) fn stored_edges(&self) -> &[StoredEdge] {
        &self.edges
    }

    pub(crate) fn slot_of(&self, canonical: &str) -> Option<usize> {
        self.nodes.get_index_of(canonical)
    }

    pub(crate) fn node_name(&self, slot: usize) -> &str {
        self.nodes
            .get_index(slot)
            .map(|(id, _)| id.as_str())
            .expect("edge endpoint refers to an interned node")
    }

    pub(crate) fn incident_edges(&self, slot: usize) -> &[usize] {
        &self.nodes[slot]
    }

    pub(crate) fn resolve(&self, edge: &StoredEdge, weight: f64) -> DistinctEdge {
        let u = self.node_name(edge.from);
        let v = self.node_name(edge.to);
        let (origin, destination) = if u <= v { (u, v) } else { (v, u) };
        DistinctEdge {
            origin: origin.to_string(),
            destination: destination.to_string(),
            weight,
            label: edge.label.clone(),
        }
    }
}

impl GraphQuery for GraphStore {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn nodes_sorted(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(&name::normalize(id))
    }

    fn adjacency_of(&self, id: &str) -> Option<Vec<Adjacency>> {
        let slot = self.nodes.get_index_of(&name::normalize(id))?;
        Some(
            self.nodes[slot]
                .iter()
                .map(|&e| {
                    let edge = &self.edges[e];
                    let other = if edge.from == slot { edge.to } else { edge.from };
                    Adjacency {
                        to: self.node_name(other).to_string(),
                        weight: edge.weight,
                        label: edge.label.clone(),
                    }
                })
                .collect(),
        )
    }

    fn edges_distinct(&self) -> Vec<DistinctEdge> {
        self.edges
            .iter()
            .map(|edge| self.resolve(edge, edge.weight))
            .collect()
    }
}
