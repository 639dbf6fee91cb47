//! Copy-on-write perturbation snapshots
//!
//! Benchmarking workflows want the same graph with a few weights pushed
//! negative, or with a negative cycle wired in. A [`WeightOverlay`]
//! layers those edits over a shared immutable [`GraphStore`] instead of
//! duplicating the structure; the base store is never touched.

use super::query::GraphQuery;
use super::store::{GraphError, GraphResult, GraphStore, StoredEdge};
use super::types::{Adjacency, DistinctEdge};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for pushing a sampled fraction of edge weights negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerturbationConfig {
    /// Amount subtracted from each chosen weight.
    pub shift: f64,
    /// Fraction of the physical edges to touch, minimum one edge.
    pub fraction: f64,
    /// Seed for the sampling RNG.
    pub seed: u64,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            shift: 0.6,
            fraction: 0.03,
            seed: 12345,
        }
    }
}

/// Parameters for wiring a negative cycle through random nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Number of nodes on the cycle.
    pub size: usize,
    /// Weight assigned to every cycle edge.
    pub weight: f64,
    /// Seed for the sampling RNG.
    pub seed: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            size: 3,
            weight: -0.8,
            seed: 12345,
        }
    }
}

/// A derived snapshot: the base store plus weight overrides and injected
/// edges. Implements [`GraphQuery`], so every algorithm runs against it
/// unchanged.
#[derive(Debug, Clone)]
pub struct WeightOverlay<'a> {
    base: &'a GraphStore,
    /// Physical-edge id -> replacement weight.
    overrides: FxHashMap<usize, f64>,
    /// Edges that exist only in this snapshot, endpoints as base slots.
    injected: Vec<StoredEdge>,
}

impl<'a> WeightOverlay<'a> {
    /// Derive a fresh, edit-free snapshot of `base`.
    pub fn derive(base: &'a GraphStore) -> Self {
        WeightOverlay {
            base,
            overrides: FxHashMap::default(),
            injected: Vec::new(),
        }
    }

    /// Subtract `cfg.shift` from a seeded random sample of
    /// `cfg.fraction` of the physical edges (at least one when any
    /// exist). Returns how many edges were shifted.
    pub fn shift_negative_fraction(&mut self, cfg: PerturbationConfig) -> usize {
        let total = self.base.edge_count();
        if total == 0 {
            return 0;
        }

        let amount = ((total as f64 * cfg.fraction) as usize).max(1).min(total);
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        for edge in rand::seq::index::sample(&mut rng, total, amount) {
            let current = self.effective_weight(edge);
            self.overrides.insert(edge, current - cfg.shift);
        }

        debug!(shifted = amount, shift = cfg.shift, "applied negative fraction");
        amount
    }

    /// Wire a cycle of `cfg.size` seeded-random nodes at `cfg.weight`
    /// per edge, overriding existing edges between consecutive cycle
    /// nodes and injecting the missing ones. Returns the cycle in order.
    pub fn inject_negative_cycle(&mut self, cfg: CycleConfig) -> GraphResult<Vec<String>> {
        let available = self.base.node_count();
        if cfg.size < 2 || available < cfg.size {
            return Err(GraphError::NotEnoughNodes {
                needed: cfg.size.max(2),
                available,
            });
        }

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let chosen: Vec<usize> =
            rand::seq::index::sample(&mut rng, available, cfg.size).into_vec();

        for i in 0..cfg.size {
            let a = chosen[i];
            let b = chosen[(i + 1) % cfg.size];

            if self.override_pair(a, b, cfg.weight) == 0 {
                self.injected.push(StoredEdge {
                    from: a,
                    to: b,
                    weight: cfg.weight,
                    label: None,
                });
            }
        }

        let cycle: Vec<String> = chosen
            .iter()
            .map(|&slot| self.base.node_name(slot).to_string())
            .collect();
        debug!(cycle = ?cycle, weight = cfg.weight, "injected negative cycle");
        Ok(cycle)
    }

    /// Override the weight of every edge between two nodes (parallel
    /// edges included). Unknown nodes match nothing. Returns how many
    /// edges were overridden.
    pub fn set_weight(&mut self, u: &str, v: &str, weight: f64) -> usize {
        let ua = super::name::normalize(u);
        let va = super::name::normalize(v);
        match (self.base.slot_of(&ua), self.base.slot_of(&va)) {
            (Some(a), Some(b)) => self.override_pair(a, b, weight),
            _ => 0,
        }
    }

    fn override_pair(&mut self, a: usize, b: usize, weight: f64) -> usize {
        let mut touched = 0;
        for (id, edge) in self.base.stored_edges().iter().enumerate() {
            if (edge.from == a && edge.to == b) || (edge.from == b && edge.to == a) {
                self.overrides.insert(id, weight);
                touched += 1;
            }
        }
        for edge in &mut self.injected {
            if (edge.from == a && edge.to == b) || (edge.from == b && edge.to == a) {
                edge.weight = weight;
                touched += 1;
            }
        }
        touched
    }

    fn effective_weight(&self, edge: usize) -> f64 {
        self.overrides
            .get(&edge)
            .copied()
            .unwrap_or_else(|| self.base.stored_edges()[edge].weight)
    }
}

impl GraphQuery for WeightOverlay<'_> {
    fn node_count(&self) -> usize {
        self.base.node_count()
    }

    fn edge_count(&self) -> usize {
        self.base.edge_count() + self.injected.len()
    }

    fn nodes_sorted(&self) -> Vec<String> {
        self.base.nodes_sorted()
    }

    fn has_node(&self, id: &str) -> bool {
        self.base.has_node(id)
    }

    fn adjacency_of(&self, id: &str) -> Option<Vec<Adjacency>> {
        let canonical = super::name::normalize(id);
        let slot = self.base.slot_of(&canonical)?;

        let mut entries: Vec<Adjacency> = self
            .base
            .incident_edges(slot)
            .iter()
            .map(|&e| {
                let edge = &self.base.stored_edges()[e];
                let other = if edge.from == slot { edge.to } else { edge.from };
                Adjacency {
                    to: self.base.node_name(other).to_string(),
                    weight: self.effective_weight(e),
                    label: edge.label.clone(),
                }
            })
            .collect();

        for edge in &self.injected {
            if edge.from == slot || edge.to == slot {
                let other = if edge.from == slot { edge.to } else { edge.from };
                entries.push(Adjacency {
                    to: self.base.node_name(other).to_string(),
                    weight: edge.weight,
                    label: edge.label.clone(),
                });
            }
        }

        Some(entries)
    }

    fn edges_distinct(&self) -> Vec<DistinctEdge> {
        let mut edges: Vec<DistinctEdge> = self
            .base
            .stored_edges()
            .iter()
            .enumerate()
            .map(|(id, edge)| self.base.resolve(edge, self.effective_weight(id)))
            .collect();
        edges.extend(
            self.injected
                .iter()
                .map(|edge| self.base.resolve(edge, edge.weight)),
        );
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{EdgeRecord, GraphKind};

    fn base_store() -> GraphStore {
        let edges = vec![
            EdgeRecord::new("A", "B").with_weight(1.0),
            EdgeRecord::new("B", "C").with_weight(2.0),
            EdgeRecord::new("C", "D").with_weight(3.0),
            EdgeRecord::new("D", "A").with_weight(4.0),
        ];
        GraphStore::build(GraphKind::Similarity, &edges, &[]).unwrap()
    }

    #[test]
    fn test_overlay_starts_identical_to_base() {
        let base = base_store();
        let overlay = WeightOverlay::derive(&base);
        assert_eq!(overlay.edges_distinct(), base.edges_distinct());
    }

    #[test]
    fn test_set_weight_leaves_base_untouched() {
        let base = base_store();
        let mut overlay = WeightOverlay::derive(&base);

        assert_eq!(overlay.set_weight("a", "b", -5.0), 1);

        let shifted = overlay
            .edges_distinct()
            .into_iter()
            .find(|e| e.origin == "A" && e.destination == "B")
            .unwrap();
        assert_eq!(shifted.weight, -5.0);

        let original = base
            .edges_distinct()
            .into_iter()
            .find(|e| e.origin == "A" && e.destination == "B")
            .unwrap();
        assert_eq!(original.weight, 1.0);
    }

    #[test]
    fn test_shift_negative_fraction_is_deterministic() {
        let base = base_store();

        let mut first = WeightOverlay::derive(&base);
        let mut second = WeightOverlay::derive(&base);
        let cfg = PerturbationConfig {
            shift: 0.5,
            fraction: 0.5,
            seed: 7,
        };

        assert_eq!(first.shift_negative_fraction(cfg), 2);
        assert_eq!(second.shift_negative_fraction(cfg), 2);
        assert_eq!(first.edges_distinct(), second.edges_distinct());
    }

    #[test]
    fn test_shift_touches_at_least_one_edge() {
        let base = base_store();
        let mut overlay = WeightOverlay::derive(&base);
        let shifted = overlay.shift_negative_fraction(PerturbationConfig {
            fraction: 0.0001,
            ..Default::default()
        });
        assert_eq!(shifted, 1);
    }

    #[test]
    fn test_inject_negative_cycle_covers_requested_size() {
        let base = base_store();
        let mut overlay = WeightOverlay::derive(&base);

        let cycle = overlay
            .inject_negative_cycle(CycleConfig::default())
            .unwrap();
        assert_eq!(cycle.len(), 3);

        // Every consecutive pair is now connected at the cycle weight.
        for i in 0..cycle.len() {
            let a = &cycle[i];
            let b = &cycle[(i + 1) % cycle.len()];
            let found = overlay
                .adjacency_of(a)
                .unwrap()
                .into_iter()
                .any(|e| &e.to == b && e.weight == -0.8);
            assert!(found, "missing cycle edge {} - {}", a, b);
        }
    }

    #[test]
    fn test_inject_rejects_oversized_cycle() {
        let base = base_store();
        let mut overlay = WeightOverlay::derive(&base);

        let err = overlay
            .inject_negative_cycle(CycleConfig {
                size: 9,
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::NotEnoughNodes {
                needed: 9,
                available: 4
            }
        );
    }
}
