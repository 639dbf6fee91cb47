//! Breadth-first and depth-first traversal
//!
//! Thin adapters over the kernel traversals: validate the requested
//! nodes, run on the dense view, return maps keyed by canonical id.

use super::{index_snapshot, AlgoResult, GraphIndex};
use crate::graph::GraphQuery;
use serde::Serialize;
use std::collections::BTreeMap;
use vicinia_graph_algorithms::{traversal as kernel, EdgeClass};

/// Breadth-first traversal output.
#[derive(Debug, Clone, Serialize)]
pub struct BfsResult {
    pub source: String,
    /// Hop count per reached node; unreached nodes have no entry.
    pub distances: BTreeMap<String, u32>,
    pub predecessors: BTreeMap<String, String>,
    /// Nodes in dequeue order.
    pub order: Vec<String>,
}

/// Classic FIFO-queue traversal from `source`, hop distances increasing
/// one per level.
pub fn bfs(g: &impl GraphQuery, source: &str) -> AlgoResult<BfsResult> {
    let ix = index_snapshot(g);
    let src = ix.require(source)?;
    let run = kernel::bfs(&ix.view, src);

    let mut distances = BTreeMap::new();
    let mut predecessors = BTreeMap::new();
    for (idx, hops) in run.distance.iter().enumerate() {
        if let Some(hops) = hops {
            distances.insert(ix.name(idx).to_string(), *hops);
        }
        if let Some(pred) = run.pred[idx] {
            predecessors.insert(ix.name(idx).to_string(), ix.name(pred).to_string());
        }
    }

    Ok(BfsResult {
        source: ix.name(src).to_string(),
        distances,
        predecessors,
        order: run.order.iter().map(|&i| ix.name(i).to_string()).collect(),
    })
}

/// How a depth-first sweep met an adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClassification {
    Tree,
    Back,
    Forward,
    Cross,
}

impl From<EdgeClass> for EdgeClassification {
    fn from(class: EdgeClass) -> Self {
        match class {
            EdgeClass::Tree => EdgeClassification::Tree,
            EdgeClass::Back => EdgeClassification::Back,
            EdgeClass::Forward => EdgeClassification::Forward,
            EdgeClass::Cross => EdgeClassification::Cross,
        }
    }
}

/// One classified directed adjacency entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedEdge {
    pub from: String,
    pub to: String,
    pub class: EdgeClassification,
}

/// Depth-first traversal output. Discovery and finish stamps come from
/// one shared monotonic timer.
#[derive(Debug, Clone, Serialize)]
pub struct DfsResult {
    pub discovery: BTreeMap<String, u32>,
    pub finish: BTreeMap<String, u32>,
    pub predecessors: BTreeMap<String, String>,
    /// Nodes in discovery order.
    pub order: Vec<String>,
    pub edges: Vec<ClassifiedEdge>,
}

/// Iterative depth-first sweep over the whole snapshot.
///
/// `sources` are expanded first in the given order (already-visited ones
/// skipped); every remaining node follows in canonical sorted order, so
/// the numbering is deterministic regardless of load order.
pub fn dfs(g: &impl GraphQuery, sources: &[&str]) -> AlgoResult<DfsResult> {
    let ix = index_snapshot(g);
    let roots = sources
        .iter()
        .map(|s| ix.require(s))
        .collect::<AlgoResult<Vec<usize>>>()?;

    let run = kernel::dfs(&ix.view, &roots);

    let mut discovery = BTreeMap::new();
    let mut finish = BTreeMap::new();
    let mut predecessors = BTreeMap::new();
    for idx in 0..ix.names().len() {
        discovery.insert(ix.name(idx).to_string(), run.discovery[idx]);
        finish.insert(ix.name(idx).to_string(), run.finish[idx]);
        if let Some(pred) = run.pred[idx] {
            predecessors.insert(ix.name(idx).to_string(), ix.name(pred).to_string());
        }
    }

    Ok(DfsResult {
        discovery,
        finish,
        predecessors,
        order: run.order.iter().map(|&i| ix.name(i).to_string()).collect(),
        edges: run
            .edges
            .into_iter()
            .map(|(u, v, class)| ClassifiedEdge {
                from: ix.name(u).to_string(),
                to: ix.name(v).to_string(),
                class: class.into(),
            })
            .collect(),
    })
}

/// Connected components, largest first; members sorted canonically.
pub fn connected_components(g: &impl GraphQuery) -> Vec<Vec<String>> {
    let ix = index_snapshot(g);
    components_of(&ix)
}

/// Nodes of the largest connected component, sorted canonically.
pub fn largest_component(g: &impl GraphQuery) -> Vec<String> {
    let ix = index_snapshot(g);
    components_of(&ix).into_iter().next().unwrap_or_default()
}

fn components_of(ix: &GraphIndex) -> Vec<Vec<String>> {
    kernel::connected_components(&ix.view)
        .into_iter()
        .map(|comp| {
            let mut members: Vec<String> =
                comp.into_iter().map(|i| ix.name(i).to_string()).collect();
            members.sort();
            members
        })
        .collect()
}
