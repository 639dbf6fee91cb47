//! All-pairs shortest paths on a dense distance matrix

use super::common::GraphView;
use ndarray::Array2;

/// Floyd-Warshall output.
#[derive(Debug, Clone)]
pub struct DenseDistances {
    /// `dist[[i, j]]` is the shortest distance from i to j,
    /// `f64::INFINITY` when unreachable.
    pub dist: Array2<f64>,
    /// A negative diagonal entry appeared after relaxation. Distances
    /// touching such a node are not valid shortest paths.
    pub has_negative_cycle: bool,
}

/// Floyd-Warshall over every node pair, O(V^3).
///
/// The diagonal starts at 0 and direct entries at the minimum weight over
/// parallel edges. With `directed` false each entry is seeded
/// symmetrically, so the same routine serves directed and undirected
/// inputs.
pub fn floyd_warshall(view: &GraphView, directed: bool) -> DenseDistances {
    let n = view.node_count();
    let mut dist = Array2::from_elem((n, n), f64::INFINITY);

    for i in 0..n {
        dist[[i, i]] = 0.0;
    }

    for (u, nb) in view.arcs() {
        if nb.weight < dist[[u, nb.target]] {
            dist[[u, nb.target]] = nb.weight;
        }
        if !directed && nb.weight < dist[[nb.target, u]] {
            dist[[nb.target, u]] = nb.weight;
        }
    }

    for k in 0..n {
        for i in 0..n {
            let ik = dist[[i, k]];
            if ik.is_infinite() {
                continue;
            }
            for j in 0..n {
                let through = ik + dist[[k, j]];
                if through < dist[[i, j]] {
                    dist[[i, j]] = through;
                }
            }
        }
    }

    let has_negative_cycle = (0..n).any(|i| dist[[i, i]] < 0.0);

    DenseDistances { dist, has_negative_cycle }
}
