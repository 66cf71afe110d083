use rundag::dag::{CycleError, DependencyGraph};

#[test]
fn topological_order_respects_edges() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("b", "c").unwrap();
    graph.add_edge("a", "c").unwrap();

    assert_eq!(graph.topological_order(), vec!["a", "b", "c"]);
}

#[test]
fn insertion_order_breaks_ties() {
    // No edges at all: the order is exactly the insertion order.
    let mut graph = DependencyGraph::new();
    graph.add_node("b");
    graph.add_node("a");
    graph.add_node("c");

    assert_eq!(graph.topological_order(), vec!["b", "a", "c"]);
}

#[test]
fn diamond_orders_join_last() {
    // a -> b, a -> c, b -> d, c -> d.
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("a", "c").unwrap();
    graph.add_edge("b", "d").unwrap();
    graph.add_edge("c", "d").unwrap();

    // b before c because b was inserted first; d strictly last.
    assert_eq!(graph.topological_order(), vec!["a", "b", "c", "d"]);
}

#[test]
fn order_is_deterministic_across_calls() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("root", "left").unwrap();
    graph.add_edge("root", "right").unwrap();
    graph.add_node("floating");

    let first = graph.topological_order();
    for _ in 0..5 {
        assert_eq!(graph.topological_order(), first);
    }
}

#[test]
fn in_degrees_cover_edge_targets() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("a", "c").unwrap();
    graph.add_edge("b", "c").unwrap();

    let degrees = graph.in_degrees();
    assert_eq!(degrees["a"], 0);
    assert_eq!(degrees["b"], 1);
    // "c" never went through add_node explicitly, it only appears as a
    // target, and still gets a full in-degree entry.
    assert_eq!(degrees["c"], 2);
    assert_eq!(degrees.len(), 3);
}

#[test]
fn add_node_is_idempotent() {
    let mut graph = DependencyGraph::new();
    graph.add_node("a");
    graph.add_edge("a", "b").unwrap();
    graph.add_node("a");

    assert_eq!(graph.successors("a"), ["b"]);
    assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn cycle_closing_edge_is_rejected_and_rolled_back() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("b", "c").unwrap();

    let err = graph.add_edge("c", "a").unwrap_err();
    assert_eq!(err, CycleError { from: "c", to: "a" });

    // The failed mutation left no trace: same nodes, no extra edge, still
    // fully sortable.
    assert_eq!(graph.len(), 3);
    assert!(graph.successors("c").is_empty());
    assert_eq!(graph.topological_order(), vec!["a", "b", "c"]);
}

#[test]
fn two_node_cycle_is_rejected() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b").unwrap();

    let err = graph.add_edge("b", "a").unwrap_err();
    assert_eq!(err, CycleError { from: "b", to: "a" });
    assert!(graph.successors("b").is_empty());
}

#[test]
fn self_edge_is_rejected() {
    let mut graph = DependencyGraph::new();
    let err = graph.add_edge("a", "a").unwrap_err();

    assert_eq!(err, CycleError { from: "a", to: "a" });
    // "a" was materialized by the failed call, so rollback removed it again.
    assert!(graph.is_empty());
}

#[test]
fn self_edge_on_existing_node_keeps_the_node() {
    let mut graph = DependencyGraph::new();
    graph.add_node("a");

    assert!(graph.add_edge("a", "a").is_err());
    assert_eq!(graph.len(), 1);
    assert!(graph.successors("a").is_empty());
}

#[test]
fn graph_stays_usable_after_a_rejected_edge() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("a", "b").unwrap();
    assert!(graph.add_edge("b", "a").is_err());

    graph.add_edge("b", "c").unwrap();
    assert_eq!(graph.topological_order(), vec!["a", "b", "c"]);
}
