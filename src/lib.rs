//! Vicinia Graph Analytics
//!
//! An in-memory analytics engine for weighted, undirected relationship
//! graphs: neighborhoods joined by streets, or items joined by
//! similarity. A graph is built once from loader records and then
//! answers structural queries: traversal orders, shortest paths and
//! locality/density metrics.
//!
//! # Architecture
//!
//! - `graph`: canonical name normalization, the batch-built immutable
//!   [`GraphStore`], copy-on-write perturbation overlays and the
//!   dataset registry.
//! - `algo`: BFS/DFS traversal, Dijkstra / Bellman-Ford /
//!   Floyd-Warshall shortest paths and density metrics, implemented as
//!   pure reads over any [`GraphQuery`] snapshot. The index-compressed
//!   kernels live in the `vicinia-graph-algorithms` crate.
//!
//! Loading delimited files, rendering, serving and persistence are
//! external collaborators: this crate consumes plain records and
//! produces serializable result structures.
//!
//! ## Example Usage
//!
//! ```rust
//! use vicinia::graph::{EdgeRecord, GraphKind, GraphStore};
//! use vicinia::algo;
//!
//! let records = vec![
//!     EdgeRecord::new("Casa Forte", "Apipucos")
//!         .with_weight(1.5)
//!         .with_label("Rua do Chacon"),
//!     EdgeRecord::new("Apipucos", "Monteiro").with_weight(2.0),
//! ];
//! let store = GraphStore::build(GraphKind::Location, &records, &[]).unwrap();
//!
//! let run = algo::dijkstra(&store, "casa forte", None).unwrap();
//! assert_eq!(run.distances["MONTEIRO"], 3.5);
//!
//! let path = algo::reconstruct_path(&run.predecessors, "monteiro");
//! assert_eq!(path, vec!["CASA FORTE", "APIPUCOS", "MONTEIRO"]);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod graph;

// Re-export main types for convenience
pub use algo::{
    AlgoError, AlgoResult, BellmanFordResult, BfsResult, DfsResult, EgoMetrics,
    FloydWarshallResult, GlobalMetrics, GroupMetrics, PathResult,
};
pub use graph::{
    DistinctEdge, EdgeRecord, GraphError, GraphKind, GraphQuery, GraphRegistry, GraphResult,
    GraphStore, GroupRecord, NodeMetadata, WeightOverlay,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
