//! Locality and density metrics
//!
//! Ego-network, group and whole-graph order/size/density, all built on
//! plain [`GraphStore`] queries. Density is 2E/(N(N-1)) for N > 1 and 0
//! otherwise; E counts physical edges with both endpoints inside the
//! node set.

use super::{AlgoError, AlgoResult};
use crate::graph::{name, GraphQuery, GraphStore};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Metrics of one node's ego network (the node plus its direct
/// neighbors).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EgoMetrics {
    pub id: String,
    /// Distinct neighbors, i.e. ego order minus the node itself.
    pub degree: usize,
    pub order: usize,
    pub size: usize,
    pub density: f64,
}

/// Metrics of one group's induced subgraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub group: String,
    pub order: usize,
    pub size: usize,
    pub density: f64,
}

/// Metrics of the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalMetrics {
    pub order: usize,
    pub size: usize,
    pub density: f64,
}

fn density(order: usize, size: usize) -> f64 {
    if order > 1 {
        (2 * size) as f64 / (order * (order - 1)) as f64
    } else {
        0.0
    }
}

fn edges_within(store: &GraphStore, members: &FxHashSet<String>) -> usize {
    store
        .edges_distinct()
        .iter()
        .filter(|e| members.contains(&e.origin) && members.contains(&e.destination))
        .count()
}

/// Ego-network metrics of a node. A node absent from the graph yields a
/// zeroed record rather than an error.
pub fn ego_network(store: &GraphStore, node: &str) -> EgoMetrics {
    let id = name::normalize(node);

    let neighbors = match store.adjacency_of(&id) {
        Some(neighbors) => neighbors,
        None => {
            return EgoMetrics {
                id,
                degree: 0,
                order: 0,
                size: 0,
                density: 0.0,
            }
        }
    };

    let mut members: FxHashSet<String> = neighbors.into_iter().map(|e| e.to).collect();
    members.insert(id.clone());

    let order = members.len();
    let size = edges_within(store, &members);

    EgoMetrics {
        id,
        degree: order - 1,
        order,
        size,
        density: density(order, size),
    }
}

/// Ego-network metrics for every node, in canonical node order.
pub fn ego_networks(store: &GraphStore) -> Vec<EgoMetrics> {
    store
        .nodes_sorted()
        .iter()
        .map(|id| ego_network(store, id))
        .collect()
}

/// Density of the subgraph induced by one group. Errors when no node
/// carries the group.
pub fn group_density(store: &GraphStore, group: &str) -> AlgoResult<GroupMetrics> {
    let wanted = group.trim();
    let members: FxHashSet<String> = store
        .nodes_sorted()
        .into_iter()
        .filter(|id| store.group_of(id) == Some(wanted))
        .collect();

    if members.is_empty() {
        return Err(AlgoError::GroupNotFound(wanted.to_string()));
    }

    let order = members.len();
    let size = edges_within(store, &members);

    Ok(GroupMetrics {
        group: wanted.to_string(),
        order,
        size,
        density: density(order, size),
    })
}

/// Density metrics per group, in lexicographic group order.
pub fn group_densities(store: &GraphStore) -> Vec<GroupMetrics> {
    store
        .groups_sorted()
        .iter()
        .filter_map(|g| group_density(store, g).ok())
        .collect()
}

/// Order, size and density of the whole graph, isolated nodes included.
pub fn global_density(store: &GraphStore) -> GlobalMetrics {
    let order = store.node_count();
    let size = store.edge_count();

    GlobalMetrics {
        order,
        size,
        density: density(order, size),
    }
}
