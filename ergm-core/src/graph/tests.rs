use rand::SeedableRng;
use rand_pcg::Pcg64;
use rstest::rstest;

use super::*;
use crate::error::GraphError;

fn three_cycle() -> Graph {
    let mut graph = Graph::new(3);
    graph.insert_arc(0, 1).expect("insert 0->1");
    graph.insert_arc(1, 2).expect("insert 1->2");
    graph.insert_arc(2, 0).expect("insert 2->0");
    graph
}

#[test]
fn new_graph_is_empty_and_valid() {
    let graph = Graph::new(5);
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.arc_count(), 0);
    assert_eq!(graph.mutual_count(), 0);
    graph.invariants().check_all().expect("empty graph valid");
}

#[test]
fn insert_then_remove_round_trips() {
    let mut graph = Graph::new(4);
    graph.insert_arc(0, 1).expect("insert");
    assert!(graph.is_arc(0, 1));
    assert_eq!(graph.arc_count(), 1);
    graph.invariants().check_all().expect("valid after insert");

    graph.remove_arc(0, 1).expect("remove");
    assert!(!graph.is_arc(0, 1));
    assert_eq!(graph.arc_count(), 0);
    graph.invariants().check_all().expect("valid after remove");
}

#[test]
fn insert_rejects_self_loop() {
    let mut graph = Graph::new(3);
    let err = graph.insert_arc(1, 1).expect_err("self loop rejected");
    assert!(matches!(err, GraphError::SelfLoop { node: 1 }));
}

#[test]
fn insert_rejects_out_of_bounds_node() {
    let mut graph = Graph::new(3);
    let err = graph.insert_arc(0, 5).expect_err("out of bounds rejected");
    assert!(matches!(
        err,
        GraphError::NodeOutOfBounds {
            node: 5,
            node_count: 3
        }
    ));
}

#[test]
fn insert_rejects_duplicate_arc() {
    let mut graph = Graph::new(3);
    graph.insert_arc(0, 1).expect("first insert");
    let err = graph.insert_arc(0, 1).expect_err("duplicate rejected");
    assert!(matches!(
        err,
        GraphError::ArcAlreadyPresent { tail: 0, head: 1 }
    ));
}

#[test]
fn remove_rejects_absent_arc() {
    let mut graph = Graph::new(3);
    let err = graph.remove_arc(0, 1).expect_err("absent arc rejected");
    assert!(matches!(
        err,
        GraphError::ArcAbsent { tail: 0, head: 1 }
    ));
}

#[test]
fn remove_arc_at_rejects_out_of_range_position() {
    let mut graph = Graph::new(3);
    graph.insert_arc(0, 1).expect("insert");
    let err = graph
        .remove_arc_at(4)
        .expect_err("out-of-range position rejected");
    assert!(matches!(
        err,
        GraphError::ArcPositionOutOfRange {
            pos: 4,
            arc_count: 1
        }
    ));
}

#[test]
fn swap_remove_preserves_reverse_index_for_moved_arc() {
    let mut graph = Graph::new(4);
    graph.insert_arc(0, 1).expect("a");
    graph.insert_arc(0, 2).expect("b");
    graph.insert_arc(0, 3).expect("c");

    // Remove the first-inserted arc; the last-inserted arc is swapped into
    // its slot and must keep a correct reverse-index entry.
    graph.remove_arc(0, 1).expect("remove");
    graph.invariants().check_all().expect("valid after swap-remove");
    assert!(graph.is_arc(0, 3));
    assert_eq!(graph.arc_position(0, 3), Some(0));
}

#[test]
fn mutual_count_tracks_reciprocated_pairs() {
    let mut graph = Graph::new(3);
    assert_eq!(graph.mutual_count(), 0);

    graph.insert_arc(0, 1).expect("0->1");
    assert_eq!(graph.mutual_count(), 0);

    graph.insert_arc(1, 0).expect("1->0");
    assert_eq!(graph.mutual_count(), 1);

    graph.insert_arc(1, 2).expect("1->2");
    assert_eq!(graph.mutual_count(), 1);

    graph.remove_arc(0, 1).expect("remove 0->1");
    assert_eq!(graph.mutual_count(), 0);
}

#[test]
fn three_cycle_has_no_mutual_pairs() {
    let graph = three_cycle();
    assert_eq!(graph.arc_count(), 3);
    assert_eq!(graph.mutual_count(), 0);
    graph.invariants().check_all().expect("cycle is valid");
}

#[test]
fn random_arc_returns_none_on_empty_graph() {
    let graph = Graph::new(4);
    let mut rng = Pcg64::seed_from_u64(1);
    assert!(graph.random_arc(&mut rng).is_none());
}

#[test]
fn random_arc_returns_some_member_of_arc_list() {
    let graph = three_cycle();
    let mut rng = Pcg64::seed_from_u64(7);
    for _ in 0..20 {
        let (tail, head, pos) = graph.random_arc(&mut rng).expect("non-empty graph");
        assert_eq!(graph.arc_position(tail, head), Some(pos));
    }
}

#[test]
fn random_non_arc_returns_none_on_complete_graph() {
    let mut graph = Graph::new(3);
    for tail in 0..3u32 {
        for head in 0..3u32 {
            if tail != head {
                graph.insert_arc(tail, head).expect("complete graph arc");
            }
        }
    }
    let mut rng = Pcg64::seed_from_u64(3);
    assert!(graph.random_non_arc(&mut rng).is_none());
}

#[test]
fn random_non_arc_never_returns_existing_arc() {
    let graph = three_cycle();
    let mut rng = Pcg64::seed_from_u64(11);
    for _ in 0..50 {
        let (i, j) = graph.random_non_arc(&mut rng).expect("non-complete graph");
        assert!(!graph.is_arc(i, j));
        assert_ne!(i, j);
    }
}

#[test]
fn random_ordered_pair_returns_none_for_single_node_graph() {
    let graph = Graph::new(1);
    let mut rng = Pcg64::seed_from_u64(5);
    assert!(graph.random_ordered_pair(&mut rng).is_none());
}

#[test]
fn is_trap_reports_nodes_with_no_out_arcs() {
    let mut graph = Graph::new(3);
    graph.insert_arc(0, 1).expect("insert");
    assert!(!graph.is_trap(0));
    assert!(graph.is_trap(1));
    assert!(graph.is_trap(2));
}

#[rstest]
#[case(0, 1)]
#[case(1, 2)]
#[case(2, 0)]
fn snowball_insert_and_remove_update_inner_arc_set(#[case] tail: NodeId, #[case] head: NodeId) {
    let mut graph = Graph::new(3);
    graph.set_snowball(SnowballMetadata::new(vec![0, 0, 1]));

    graph.insert_inner_arc(tail, head).expect("insert inner arc");
    let snowball = graph.snowball().expect("snowball attached");
    if snowball.is_inner(tail) && snowball.is_inner(head) {
        assert_eq!(snowball.num_inner_arcs(), 1);
    }

    graph.remove_inner_arc(tail, head).expect("remove inner arc");
    assert_eq!(graph.snowball().expect("snowball attached").num_inner_arcs(), 0);
}

#[test]
fn snowball_toggleable_requires_both_inner_and_adjacent_zones() {
    let snowball = SnowballMetadata::new(vec![0, 1, 2, 3]);
    assert!(snowball.is_toggleable(0, 1), "adjacent zones, both inner");
    assert!(
        !snowball.is_toggleable(0, 2),
        "zones differ by 2, even though both nodes are inner"
    );
    assert!(
        !snowball.is_toggleable(2, 3),
        "node 3 sits in max_zone and is never inner"
    );
}

#[test]
fn load_attribute_rejects_row_count_mismatch() {
    let mut graph = Graph::new(3);
    let err = graph
        .load_attribute("sex", NodeAttributes::Binary(vec![Some(true), Some(false)]))
        .expect_err("row count mismatch rejected");
    assert!(matches!(
        err,
        AttributeError::RowCountMismatch {
            rows: 2,
            node_count: 3,
            ..
        }
    ));
}

#[test]
fn load_attribute_accepts_matching_row_count() {
    let mut graph = Graph::new(3);
    graph
        .load_attribute(
            "sex",
            NodeAttributes::Binary(vec![Some(true), Some(false), None]),
        )
        .expect("matching row count accepted");
    let sex = graph.attributes().get("sex").expect("attribute present");
    assert_eq!(sex.binary(0), Some(true));
    assert!(sex.is_missing(2));
}
