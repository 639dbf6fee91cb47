use vicinia::algo;
use vicinia::graph::{
    CycleConfig, EdgeRecord, GraphKind, GraphQuery, GraphStore, GroupRecord, WeightOverlay,
};
use vicinia::AlgoError;

fn city_edges() -> Vec<EdgeRecord> {
    vec![
        EdgeRecord::new("Apipucos", "Casa Forte").with_weight(1.2).with_label("Rua do Chacon"),
        EdgeRecord::new("Casa Forte", "Parnamirim").with_weight(0.9).with_label("Rua Padre Roma"),
        EdgeRecord::new("Parnamirim", "Espinheiro").with_weight(1.1),
        EdgeRecord::new("Espinheiro", "Gracas").with_weight(0.8).with_label("Rua do Espinheiro"),
        EdgeRecord::new("Gracas", "Aflitos").with_weight(0.7),
        EdgeRecord::new("Apipucos", "Monteiro").with_weight(1.4),
        EdgeRecord::new("Monteiro", "Parnamirim").with_weight(2.3),
        EdgeRecord::new("Aflitos", "Espinheiro").with_weight(1.0),
    ]
}

fn city_store() -> GraphStore {
    GraphStore::build(GraphKind::Location, &city_edges(), &[]).unwrap()
}

#[test]
fn test_bfs_on_line_graph() {
    let edges = vec![
        EdgeRecord::new("A", "B").with_weight(1.0),
        EdgeRecord::new("B", "C").with_weight(1.0),
        EdgeRecord::new("C", "D").with_weight(1.0),
    ];
    let store = GraphStore::build(GraphKind::Location, &edges, &[]).unwrap();

    let run = algo::bfs(&store, "A").unwrap();
    assert_eq!(run.distances["A"], 0);
    assert_eq!(run.distances["B"], 1);
    assert_eq!(run.distances["C"], 2);
    assert_eq!(run.distances["D"], 3);
    assert_eq!(run.predecessors["B"], "A");
    assert_eq!(run.predecessors["C"], "B");
    assert_eq!(run.predecessors["D"], "C");
}

#[test]
fn test_dijkstra_is_symmetric_on_undirected_graph() {
    let store = city_store();
    let nodes = store.nodes_sorted();

    for u in &nodes {
        let from_u = algo::dijkstra(&store, u, None).unwrap();
        for v in &nodes {
            let from_v = algo::dijkstra(&store, v, None).unwrap();
            assert_eq!(
                from_u.distances[v], from_v.distances[u],
                "asymmetry between {u} and {v}"
            );
        }
    }
}

#[test]
fn test_single_negative_edge_is_reported_every_run() {
    let mut edges = city_edges();
    edges.push(EdgeRecord::new("Gracas", "Parnamirim").with_weight(-0.4));
    let store = GraphStore::build(GraphKind::Location, &edges, &[]).unwrap();

    for _ in 0..5 {
        let err = algo::dijkstra(&store, "apipucos", None).unwrap_err();
        match err {
            AlgoError::NegativeWeightDetected { from, to, weight } => {
                assert_eq!(weight, -0.4);
                let mut pair = [from, to];
                pair.sort();
                assert_eq!(pair, ["GRACAS".to_string(), "PARNAMIRIM".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn test_three_algorithms_agree_on_nonnegative_graph() {
    let store = city_store();
    let source = "monteiro";

    let dj = algo::dijkstra(&store, source, None).unwrap();
    let bf = algo::bellman_ford(&store, source).unwrap();
    let fw = algo::floyd_warshall(&store, false);

    assert!(bf.negative_cycle.is_none());
    assert!(!fw.has_negative_cycle);
    assert_eq!(dj.distances, bf.paths.distances);
    for (node, dist) in &dj.distances {
        assert_eq!(fw.distance(source, node), Some(*dist));
    }
}

#[test]
fn test_injected_cycle_is_reported_as_a_set() {
    // Heavy positive weights keep every other loop positive, so the
    // only negative cycle is the injected triangle.
    let edges: Vec<EdgeRecord> = [
        ("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"),
        ("E", "F"), ("F", "G"), ("G", "H"), ("H", "A"),
    ]
    .iter()
    .map(|(u, v)| EdgeRecord::new(*u, *v).with_weight(10.0))
    .collect();
    let store = GraphStore::build(GraphKind::Similarity, &edges, &[]).unwrap();

    let mut overlay = WeightOverlay::derive(&store);
    let injected = overlay
        .inject_negative_cycle(CycleConfig { size: 3, weight: -0.8, seed: 99 })
        .unwrap();

    let run = algo::bellman_ford(&overlay, "a").unwrap();
    let cycle = run.negative_cycle.expect("cycle must be detected");

    let mut expected = injected.clone();
    expected.sort();
    let mut found: Vec<String> = cycle.clone();
    found.sort();
    found.dedup();
    assert_eq!(found, expected);

    // The base graph is untouched and still cycle-free.
    let clean = algo::bellman_ford(&store, "a").unwrap();
    assert!(clean.negative_cycle.is_none());
}

#[test]
fn test_ego_density_extremes() {
    let edges = vec![
        EdgeRecord::new("A", "B").with_weight(1.0),
        EdgeRecord::new("B", "C").with_weight(1.0),
        EdgeRecord::new("A", "C").with_weight(1.0),
    ];
    let groups = vec![GroupRecord::new("Lonely", "9")];
    let store = GraphStore::build(GraphKind::Similarity, &edges, &groups).unwrap();

    // A triangle member's ego network is complete.
    assert_eq!(algo::ego_network(&store, "a").density, 1.0);
    // A node with zero neighbors has density 0.
    assert_eq!(algo::ego_network(&store, "lonely").density, 0.0);
}

#[test]
fn test_reconstruct_path_for_unreached_target() {
    let edges = vec![
        EdgeRecord::new("A", "B").with_weight(1.0),
        EdgeRecord::new("X", "Y").with_weight(1.0),
    ];
    let store = GraphStore::build(GraphKind::Location, &edges, &[]).unwrap();

    let run = algo::dijkstra(&store, "a", None).unwrap();
    assert!(run.distances["Y"].is_infinite());
    assert_eq!(algo::reconstruct_path(&run.predecessors, "y"), vec!["Y"]);
}

#[test]
fn test_metrics_invariant_to_load_order() {
    let mut forward = city_edges();
    forward.push(EdgeRecord::new("Poco", "Monteiro").with_weight(1.0));
    let mut reversed = forward.clone();
    reversed.reverse();

    let groups = vec![
        GroupRecord::new("Apipucos", "3"),
        GroupRecord::new("Monteiro", "3"),
        GroupRecord::new("Poco", "3"),
        GroupRecord::new("Gracas", "1"),
        GroupRecord::new("Aflitos", "1"),
        GroupRecord::new("Espinheiro", "1"),
    ];
    let mut groups_reversed = groups.clone();
    groups_reversed.reverse();

    let one = GraphStore::build(GraphKind::Location, &forward, &groups).unwrap();
    let other = GraphStore::build(GraphKind::Location, &reversed, &groups_reversed).unwrap();

    assert_eq!(algo::global_density(&one), algo::global_density(&other));
    assert_eq!(
        algo::group_density(&one, "1").unwrap(),
        algo::group_density(&other, "1").unwrap()
    );
    assert_eq!(
        algo::group_density(&one, "3").unwrap(),
        algo::group_density(&other, "3").unwrap()
    );
}

#[test]
fn test_dfs_numbering_invariant_to_load_order() {
    let forward = city_edges();
    let mut reversed = forward.clone();
    reversed.reverse();

    let one = GraphStore::build(GraphKind::Location, &forward, &[]).unwrap();
    let other = GraphStore::build(GraphKind::Location, &reversed, &[]).unwrap();

    let a = algo::dfs(&one, &[]).unwrap();
    let b = algo::dfs(&other, &[]).unwrap();

    assert_eq!(a.order, b.order);
    assert_eq!(a.discovery, b.discovery);
    assert_eq!(a.finish, b.finish);
}

#[test]
fn test_results_serialize_to_json() {
    let store = city_store();

    let run = algo::dijkstra(&store, "apipucos", Some("aflitos")).unwrap();
    let json = serde_json::to_value(&run).unwrap();
    assert!(json["distances"]["AFLITOS"].is_number());

    let metrics = serde_json::to_value(algo::global_density(&store)).unwrap();
    assert_eq!(metrics["order"], 7);
}
