//! Shortest-path queries
//!
//! Dijkstra, Bellman-Ford and Floyd-Warshall adapters plus the path and
//! edge-label reconstruction helpers. All maps are keyed by canonical
//! node id; distances default to `f64::INFINITY` for unreachable nodes.

use super::{index_snapshot, AlgoError, AlgoResult, GraphIndex};
use crate::graph::{name, GraphQuery};
use serde::Serialize;
use std::collections::BTreeMap;
use vicinia_graph_algorithms::{dense, pathfinding as kernel, ShortestPaths};

/// Single-source shortest-path output.
#[derive(Debug, Clone, Serialize)]
pub struct PathResult {
    pub source: String,
    /// Distance per node, `f64::INFINITY` when unreachable.
    pub distances: BTreeMap<String, f64>,
    /// Predecessor per reached node (absent for the source itself).
    pub predecessors: BTreeMap<String, String>,
    /// Label of the edge used to reach each node; empty string when the
    /// edge carries no label.
    pub predecessor_labels: BTreeMap<String, String>,
}

fn to_path_result(ix: &GraphIndex, source: usize, paths: &ShortestPaths) -> PathResult {
    let mut distances = BTreeMap::new();
    let mut predecessors = BTreeMap::new();
    let mut predecessor_labels = BTreeMap::new();

    for idx in 0..ix.names().len() {
        distances.insert(ix.name(idx).to_string(), paths.dist[idx]);

        if let Some(pred) = paths.pred[idx] {
            predecessors.insert(ix.name(idx).to_string(), ix.name(pred).to_string());
            let label = paths.pred_edge[idx]
                .and_then(|e| ix.label_of(e))
                .unwrap_or_default();
            predecessor_labels.insert(ix.name(idx).to_string(), label.to_string());
        }
    }

    PathResult {
        source: ix.name(source).to_string(),
        distances,
        predecessors,
        predecessor_labels,
    }
}

/// Dijkstra from `source`, optionally stopping once `target` is popped.
///
/// Weights must be non-negative. The precondition is not checked up
/// front: the first negative edge met during relaxation aborts the call
/// with [`AlgoError::NegativeWeightDetected`] naming the edge, and no
/// partial result is returned. With early stopping, distances of nodes
/// that never popped are not guaranteed final.
pub fn dijkstra(
    g: &impl GraphQuery,
    source: &str,
    target: Option<&str>,
) -> AlgoResult<PathResult> {
    let ix = index_snapshot(g);
    let src = ix.require(source)?;
    let tgt = target.map(|t| ix.require(t)).transpose()?;

    match kernel::dijkstra(&ix.view, src, tgt) {
        Ok(paths) => Ok(to_path_result(&ix, src, &paths)),
        Err(edge) => Err(AlgoError::NegativeWeightDetected {
            from: ix.name(edge.from).to_string(),
            to: ix.name(edge.to).to_string(),
            weight: edge.weight,
        }),
    }
}

/// Bellman-Ford output.
#[derive(Debug, Clone, Serialize)]
pub struct BellmanFordResult {
    pub paths: PathResult,
    /// Ordered node list of one negative cycle, when present. While
    /// set, distances of nodes reachable through the cycle are
    /// unreliable and must not be read as shortest paths.
    pub negative_cycle: Option<Vec<String>>,
}

/// Bellman-Ford from `source`. Handles negative weights; a negative
/// cycle is reported as data, not as an error.
pub fn bellman_ford(g: &impl GraphQuery, source: &str) -> AlgoResult<BellmanFordResult> {
    let ix = index_snapshot(g);
    let src = ix.require(source)?;

    let run = kernel::bellman_ford(&ix.view, src);

    Ok(BellmanFordResult {
        paths: to_path_result(&ix, src, &run.paths),
        negative_cycle: run
            .cycle
            .map(|cycle| cycle.into_iter().map(|i| ix.name(i).to_string()).collect()),
    })
}

/// All-pairs shortest distances.
#[derive(Debug, Clone, Serialize)]
pub struct FloydWarshallResult {
    /// Row/column order of the matrix: canonical sorted node ids.
    pub nodes: Vec<String>,
    /// `distances[i][j]` is the shortest distance from `nodes[i]` to
    /// `nodes[j]`, `f64::INFINITY` when unreachable.
    pub distances: Vec<Vec<f64>>,
    /// A negative diagonal entry appeared after relaxation; distances
    /// touching such nodes are not valid shortest paths.
    pub has_negative_cycle: bool,
}

impl FloydWarshallResult {
    /// Distance between two nodes by label; `None` when either is
    /// unknown.
    pub fn distance(&self, u: &str, v: &str) -> Option<f64> {
        let i = self.position(u)?;
        let j = self.position(v)?;
        Some(self.distances[i][j])
    }

    fn position(&self, raw: &str) -> Option<usize> {
        let canonical = name::normalize(raw);
        self.nodes
            .binary_search_by(|n| n.as_str().cmp(canonical.as_str()))
            .ok()
    }
}

/// Dense O(V^3) all-pairs computation. The node count is exposed via
/// [`GraphQuery::node_count`] so callers can apply their own size guard
/// first; the routine itself runs to completion.
pub fn floyd_warshall(g: &impl GraphQuery, directed: bool) -> FloydWarshallResult {
    let ix = index_snapshot(g);
    let run = dense::floyd_warshall(&ix.view, directed);

    FloydWarshallResult {
        nodes: ix.names().to_vec(),
        distances: run.dist.outer_iter().map(|row| row.to_vec()).collect(),
        has_negative_cycle: run.has_negative_cycle,
    }
}

/// Walk predecessor links backward from `target` until the chain ends,
/// then reverse. A target with no predecessor yields the single-element
/// path `[target]`, deliberately also for unreachable targets, so the
/// caller distinguishes "no path" by the distance map, not the path
/// shape.
pub fn reconstruct_path(predecessors: &BTreeMap<String, String>, target: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = name::normalize(target);
    path.push(current.clone());

    // Bounded walk: a well-formed predecessor map is acyclic, but a
    // hand-built one must not hang us.
    for _ in 0..predecessors.len() {
        match predecessors.get(&current) {
            Some(pred) => {
                path.push(pred.clone());
                current = pred.clone();
            }
            None => break,
        }
    }

    path.reverse();
    path
}

/// Walk the same chain pairing each hop with its recorded edge label,
/// defaulting to the empty string where none was recorded.
pub fn reconstruct_edge_labels(
    predecessors: &BTreeMap<String, String>,
    labels: &BTreeMap<String, String>,
    target: &str,
) -> Vec<String> {
    let mut hops = Vec::new();
    let mut current = name::normalize(target);

    for _ in 0..predecessors.len() {
        match predecessors.get(&current) {
            Some(pred) => {
                hops.push(labels.get(&current).cloned().unwrap_or_default());
                current = pred.clone();
            }
            None => break,
        }
    }

    hops.reverse();
    hops
}
