//! Index-compressed graph algorithm kernels for Vicinia.
//!
//! Everything here works on dense `usize` node indices; the root crate
//! owns the mapping between canonical node names and indices.

pub mod common;
pub mod dense;
pub mod pathfinding;
pub mod traversal;

pub use common::{GraphView, Neighbor};
pub use dense::{floyd_warshall, DenseDistances};
pub use pathfinding::{bellman_ford, dijkstra, BellmanFord, NegativeEdge, ShortestPaths};
pub use traversal::{bfs, connected_components, dfs, BfsResult, DfsResult, EdgeClass};
