//! Graph model and storage
//!
//! This module implements the weighted undirected graph core:
//! - canonical node-label normalization shared by load and lookup
//! - batch-built, immutable adjacency storage with an external group map
//! - a read-only query trait shared by base stores and derived snapshots
//! - copy-on-write perturbation overlays for benchmarking workflows
//! - an explicit dataset registry with construction-once semantics

pub mod name;
pub mod overlay;
pub mod query;
pub mod registry;
pub mod store;
pub mod types;

// Re-export main types
pub use name::normalize;
pub use overlay::{CycleConfig, PerturbationConfig, WeightOverlay};
pub use query::GraphQuery;
pub use registry::{GraphRegistry, RegistryError};
pub use store::{GraphError, GraphResult, GraphStore, DEFAULT_WEIGHT};
pub use types::{
    Adjacency, DistinctEdge, EdgeKey, EdgeRecord, GraphKind, GroupRecord, NodeMetadata,
};
