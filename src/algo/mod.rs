//! Graph algorithms
//!
//! The algorithms themselves live in the `vicinia-graph-algorithms`
//! crate and run on dense indices. This module is the integration
//! layer: it compresses a [`GraphQuery`] snapshot into a kernel view,
//! validates requested nodes, and maps results back onto canonical node
//! ids.

use crate::graph::{name, GraphQuery};
use rustc_hash::FxHashMap;
use thiserror::Error;
use vicinia_graph_algorithms::GraphView;

pub mod metrics;
pub mod pathfinding;
pub mod traversal;

// Re-export the public algorithm surface
pub use metrics::{
    ego_network, ego_networks, global_density, group_densities, group_density, EgoMetrics,
    GlobalMetrics, GroupMetrics,
};
pub use pathfinding::{
    bellman_ford, dijkstra, floyd_warshall, reconstruct_edge_labels, reconstruct_path,
    BellmanFordResult, FloydWarshallResult, PathResult,
};
pub use traversal::{
    bfs, connected_components, dfs, largest_component, BfsResult, ClassifiedEdge, DfsResult,
    EdgeClassification,
};

/// Errors produced by algorithm calls. Local to a single call; there is
/// no retry or recovery in this layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    /// A requested source or target is absent from the node set.
    #[error("node {0:?} not found in graph")]
    NodeNotFound(String),

    /// No node carries the requested group label.
    #[error("group {0:?} not found in graph")]
    GroupNotFound(String),

    /// Dijkstra met a negative weight; the whole call is void.
    #[error("negative weight {weight} on edge {from:?} - {to:?}")]
    NegativeWeightDetected {
        from: String,
        to: String,
        weight: f64,
    },
}

pub type AlgoResult<T> = Result<T, AlgoError>;

/// Dense compression of one snapshot: canonical names in sorted order,
/// the kernel view, and per-edge labels aligned with kernel edge ids.
pub(crate) struct GraphIndex {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    labels: Vec<Option<String>>,
    pub(crate) view: GraphView,
}

/// Compress a snapshot for kernel execution. Nodes are indexed in
/// canonical sorted order, which is what makes kernel traversal output
/// deterministic.
pub(crate) fn index_snapshot(g: &impl GraphQuery) -> GraphIndex {
    let names = g.nodes_sorted();
    let index: FxHashMap<String, usize> = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), i))
        .collect();

    let mut view = GraphView::new(names.len());
    let mut labels = Vec::with_capacity(g.edge_count());

    // Canonical edge order makes kernel adjacency, and with it every
    // traversal numbering, independent of record load order.
    let mut edges = g.edges_distinct();
    edges.sort_by(|a, b| {
        (&a.origin, &a.destination, &a.label)
            .cmp(&(&b.origin, &b.destination, &b.label))
            .then_with(|| a.weight.total_cmp(&b.weight))
    });

    for edge in edges {
        if let (Some(&u), Some(&v)) = (index.get(&edge.origin), index.get(&edge.destination)) {
            view.push_edge(u, v, edge.weight);
            labels.push(edge.label);
        }
    }

    GraphIndex {
        names,
        index,
        labels,
        view,
    }
}

impl GraphIndex {
    /// Resolve a raw label to its dense index, canonicalizing first.
    pub(crate) fn require(&self, raw: &str) -> AlgoResult<usize> {
        let canonical = name::normalize(raw);
        self.index
            .get(&canonical)
            .copied()
            .ok_or(AlgoError::NodeNotFound(canonical))
    }

    pub(crate) fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn label_of(&self, edge: usize) -> Option<&str> {
        self.labels.get(edge).and_then(|l| l.as_deref())
    }
}
