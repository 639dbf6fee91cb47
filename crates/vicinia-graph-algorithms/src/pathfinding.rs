//! Single-source shortest-path kernels
//!
//! Dijkstra with lazy heap deletion, and Bellman-Ford with negative-cycle
//! reconstruction. Both operate on dense indices; callers map names.

use super::common::GraphView;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Per-source relaxation output shared by Dijkstra and Bellman-Ford.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Distance from the source; `f64::INFINITY` when unreachable.
    pub dist: Vec<f64>,
    /// Predecessor on the best path found.
    pub pred: Vec<Option<usize>>,
    /// Id of the physical edge used to reach the node.
    pub pred_edge: Vec<Option<usize>>,
}

impl ShortestPaths {
    fn new(n: usize, source: usize) -> Self {
        let mut dist = vec![f64::INFINITY; n];
        dist[source] = 0.0;
        ShortestPaths {
            dist,
            pred: vec![None; n],
            pred_edge: vec![None; n],
        }
    }
}

/// The offending edge that aborted a Dijkstra run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Heap state for Dijkstra.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

// Rust's BinaryHeap is a max-heap, so Ord is reversed for min-heap behavior.
impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra with lazy deletion.
///
/// A popped `(cost, node)` pair staler than the recorded best distance is
/// skipped instead of being decreased in place. Weights must be
/// non-negative; the precondition is not pre-validated: the first
/// negative entry met during relaxation aborts the run and the whole
/// result must be treated as failed. With `target` set, the run stops
/// once the target pops; distances of nodes not yet popped are then not
/// final.
pub fn dijkstra(
    view: &GraphView,
    source: usize,
    target: Option<usize>,
) -> Result<ShortestPaths, NegativeEdge> {
    let mut paths = ShortestPaths::new(view.node_count(), source);
    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: source });

    while let Some(State { cost, node }) = heap.pop() {
        if cost > paths.dist[node] {
            continue;
        }

        if target == Some(node) {
            break;
        }

        for nb in view.neighbors(node) {
            if nb.weight < 0.0 {
                return Err(NegativeEdge {
                    from: node,
                    to: nb.target,
                    weight: nb.weight,
                });
            }

            let next = cost + nb.weight;
            if next < paths.dist[nb.target] {
                paths.dist[nb.target] = next;
                paths.pred[nb.target] = Some(node);
                paths.pred_edge[nb.target] = Some(nb.edge);
                heap.push(State { cost: next, node: nb.target });
            }
        }
    }

    Ok(paths)
}

/// Bellman-Ford output. Distances of nodes reachable only through a
/// negative cycle are unreliable and must not be interpreted as shortest
/// paths when `cycle` is present.
#[derive(Debug, Clone)]
pub struct BellmanFord {
    pub paths: ShortestPaths,
    /// Ordered node list of one negative cycle, if any edge was still
    /// relaxable after `|V| - 1` passes.
    pub cycle: Option<Vec<usize>>,
}

/// Bellman-Ford over the full directed entry list.
///
/// Every physical undirected edge is present twice in the view and is
/// relaxed in both directions each pass; the double relaxation is what
/// makes the pass correct on an undirected graph. The single exception
/// is the exact reverse of the arc a node was reached over: re-walking
/// the arrival edge can never shorten a simple path, and permitting it
/// would collapse every negative undirected edge into a two-node cycle
/// of itself during reconstruction. Terminates early when a pass
/// performs no update.
pub fn bellman_ford(view: &GraphView, source: usize) -> BellmanFord {
    let n = view.node_count();
    let mut paths = ShortestPaths::new(n, source);

    for _ in 1..n {
        let mut updated = false;

        for (u, nb) in view.arcs() {
            if paths.pred_edge[u] == Some(nb.edge) {
                continue;
            }
            let candidate = paths.dist[u] + nb.weight;
            if candidate < paths.dist[nb.target] {
                paths.dist[nb.target] = candidate;
                paths.pred[nb.target] = Some(u);
                paths.pred_edge[nb.target] = Some(nb.edge);
                updated = true;
            }
        }

        if !updated {
            break;
        }
    }

    // Validation pass: any edge still relaxable means a negative cycle.
    let mut improvable = None;
    for (u, nb) in view.arcs() {
        if paths.pred_edge[u] == Some(nb.edge) {
            continue;
        }
        if paths.dist[u] + nb.weight < paths.dist[nb.target] {
            paths.pred[nb.target] = Some(u);
            paths.pred_edge[nb.target] = Some(nb.edge);
            improvable = Some(nb.target);
            break;
        }
    }

    let cycle = improvable.map(|start| extract_cycle(&paths.pred, start, n));

    BellmanFord { paths, cycle }
}

/// Walk the predecessor chain `n` hops to make sure the walk has entered
/// the cycle, then record nodes by first-visit index until one repeats;
/// the cycle is the stretch from the first occurrence onwards.
fn extract_cycle(pred: &[Option<usize>], start: usize, n: usize) -> Vec<usize> {
    let mut probe = start;
    for _ in 0..n {
        match pred[probe] {
            Some(p) => probe = p,
            None => break,
        }
    }

    let mut first_seen = vec![None; n];
    let mut sequence = Vec::new();
    let mut current = probe;

    loop {
        if let Some(at) = first_seen[current] {
            return sequence[at..].to_vec();
        }
        first_seen[current] = Some(sequence.len());
        sequence.push(current);
        match pred[current] {
            Some(p) => current = p,
            None => return sequence,
        }
    }
}
