//! Core type definitions for the graph engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which dataset family a graph was built from, fixed at construction.
///
/// A location graph carries street names as edge labels and an external
/// district partition; a similarity graph carries shared-attribute
/// strings. The structure and every query over it are identical; the
/// tag exists so consumers never probe a store for what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Location,
    Similarity,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Location => write!(f, "location"),
            GraphKind::Similarity => write!(f, "similarity"),
        }
    }
}

/// One edge row as supplied by the external tabular loader.
///
/// The weight is kept as raw text so the build step owns the single
/// coercion policy: an absent weight defaults, a present but non-numeric
/// one is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl EdgeRecord {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        EdgeRecord {
            origin: origin.into(),
            destination: destination.into(),
            weight: None,
            label: None,
        }
    }

    pub fn with_weight(mut self, weight: impl fmt::Display) -> Self {
        self.weight = Some(weight.to_string());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One group-membership row as supplied by the external loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub node: String,
    pub group: String,
}

impl GroupRecord {
    pub fn new(node: impl Into<String>, group: impl Into<String>) -> Self {
        GroupRecord {
            node: node.into(),
            group: group.into(),
        }
    }
}

/// Canonical key of an undirected edge: lexicographically smaller
/// endpoint first, paired with the label. Two stored directions of one
/// physical edge collapse onto the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    pub a: String,
    pub b: String,
    pub label: Option<String>,
}

impl EdgeKey {
    pub fn of(u: &str, v: &str, label: Option<&str>) -> Self {
        let (a, b) = if u <= v { (u, v) } else { (v, u) };
        EdgeKey {
            a: a.to_string(),
            b: b.to_string(),
            label: label.map(str::to_string),
        }
    }
}

/// A physical edge reported exactly once, canonically oriented.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistinctEdge {
    pub origin: String,
    pub destination: String,
    pub weight: f64,
    pub label: Option<String>,
}

impl DistinctEdge {
    /// The canonical key this edge is deduplicated under.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::of(&self.origin, &self.destination, self.label.as_deref())
    }
}

/// Metadata row for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetadata {
    pub id: String,
    pub degree: usize,
    pub group: Option<String>,
}

/// One adjacency entry as seen from a given node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjacency {
    pub to: String,
    pub weight: f64,
    pub label: Option<String>,
}
