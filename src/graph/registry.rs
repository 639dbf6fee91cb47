//! Dataset registry
//!
//! Callers that serve several datasets (the street graph, the
//! similarity graph, ...) hold built stores in an explicit registry
//! keyed by a dataset selector. Construction happens exactly once per
//! key; replacing a dataset is an explicit invalidate-then-register,
//! never an implicit rebuild.

use super::store::GraphStore;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("dataset {0:?} is already registered")]
    AlreadyRegistered(String),
}

/// Holds immutable graph snapshots keyed by dataset selector.
#[derive(Debug, Default)]
pub struct GraphRegistry {
    graphs: FxHashMap<String, Arc<GraphStore>>,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built store under a key. Fails if the key is taken;
    /// callers that mean to replace must `invalidate` first.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        store: GraphStore,
    ) -> Result<Arc<GraphStore>, RegistryError> {
        let key = key.into();
        if self.graphs.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered(key));
        }

        let shared = Arc::new(store);
        self.graphs.insert(key.clone(), Arc::clone(&shared));
        info!(dataset = %key, "registered graph");
        Ok(shared)
    }

    /// Shared handle to a registered store.
    pub fn get(&self, key: &str) -> Option<Arc<GraphStore>> {
        self.graphs.get(key).cloned()
    }

    /// Drop a dataset. Outstanding handles stay valid; the key becomes
    /// free for re-registration. Returns whether the key was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.graphs.remove(key).is_some();
        if removed {
            info!(dataset = %key, "invalidated graph");
        }
        removed
    }

    /// Registered dataset keys in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.graphs.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::query::GraphQuery;
    use crate::graph::types::{EdgeRecord, GraphKind};

    fn small_store() -> GraphStore {
        let edges = vec![EdgeRecord::new("A", "B").with_weight(1.0)];
        GraphStore::build(GraphKind::Location, &edges, &[]).unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = GraphRegistry::new();
        registry.register("bairros", small_store()).unwrap();

        let handle = registry.get("bairros").unwrap();
        assert!(handle.has_node("a"));
        assert!(registry.get("musicas").is_none());
    }

    #[test]
    fn test_register_is_construction_once() {
        let mut registry = GraphRegistry::new();
        registry.register("bairros", small_store()).unwrap();

        let err = registry.register("bairros", small_store()).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered("bairros".to_string()));
    }

    #[test]
    fn test_invalidate_frees_key_but_not_handles() {
        let mut registry = GraphRegistry::new();
        registry.register("bairros", small_store()).unwrap();
        let handle = registry.get("bairros").unwrap();

        assert!(registry.invalidate("bairros"));
        assert!(!registry.invalidate("bairros"));
        assert!(registry.get("bairros").is_none());

        // The old snapshot survives for readers already holding it.
        assert_eq!(handle.node_count(), 2);

        registry.register("bairros", small_store()).unwrap();
        assert_eq!(registry.keys(), vec!["bairros"]);
    }
}
