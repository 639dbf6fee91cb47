//! Shared types for the algorithm kernels
//!
//! Kernels never see node names. The caller compresses its graph into a
//! dense, integer-indexed [`GraphView`] and maps results back afterwards.

/// One directed adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Dense index of the node this entry points at.
    pub target: usize,
    /// Edge weight.
    pub weight: f64,
    /// Identity of the physical edge this entry belongs to. Both
    /// directions of an undirected edge share the id, which is how a
    /// relaxation step is mapped back to the edge (and its label).
    pub edge: usize,
}

/// A dense, integer-indexed adjacency view of a graph.
///
/// For undirected graphs each physical edge appears twice, once in the
/// list of either endpoint. Parallel edges are kept as separate entries
/// with distinct edge ids.
#[derive(Debug, Clone)]
pub struct GraphView {
    adjacency: Vec<Vec<Neighbor>>,
    edge_count: usize,
}

impl GraphView {
    /// Create a view with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        GraphView {
            adjacency: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of physical edges added so far.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add a single directed entry `from -> to`. Returns the id assigned
    /// to the edge.
    pub fn push_arc(&mut self, from: usize, to: usize, weight: f64) -> usize {
        let edge = self.edge_count;
        self.edge_count += 1;
        self.adjacency[from].push(Neighbor { target: to, weight, edge });
        edge
    }

    /// Add both directions of an undirected edge under one id. Returns
    /// the id.
    pub fn push_edge(&mut self, u: usize, v: usize, weight: f64) -> usize {
        let edge = self.edge_count;
        self.edge_count += 1;
        self.adjacency[u].push(Neighbor { target: v, weight, edge });
        self.adjacency[v].push(Neighbor { target: u, weight, edge });
        edge
    }

    /// Number of adjacency entries for a node (parallel edges counted
    /// individually).
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    pub fn neighbors(&self, idx: usize) -> &[Neighbor] {
        &self.adjacency[idx]
    }

    /// Every directed entry as `(from, entry)`, in list order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, Neighbor)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().map(move |nb| (u, *nb)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_edge_stores_both_directions() {
        let mut view = GraphView::new(3);
        let first = view.push_edge(0, 1, 2.5);
        let second = view.push_edge(1, 2, 1.0);

        assert_eq!(view.degree(0), 1);
        assert_eq!(view.degree(1), 2);
        assert_eq!(view.neighbors(0)[0].target, 1);
        assert_eq!(view.neighbors(1)[0].target, 0);
        assert_eq!(view.neighbors(0)[0].edge, first);
        assert_ne!(first, second);
        assert_eq!(view.arcs().count(), 4);
        assert_eq!(view.edge_count(), 2);
    }

    #[test]
    fn test_parallel_edges_get_distinct_ids() {
        let mut view = GraphView::new(2);
        let first = view.push_edge(0, 1, 1.0);
        let second = view.push_edge(0, 1, 3.0);

        assert_eq!(view.degree(0), 2);
        assert_ne!(first, second);
        assert_eq!(view.neighbors(0)[1].weight, 3.0);
    }
}
