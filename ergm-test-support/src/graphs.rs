//! Deterministic graph fixtures shared across the engine's test suites.

use ergm_core::{Graph, NodeAttributes};
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// A directed 3-cycle: `0 -> 1 -> 2 -> 0`.
#[must_use]
pub fn three_node_cycle() -> Graph {
    let mut graph = Graph::new(3);
    graph.insert_arc(0, 1).expect("0->1");
    graph.insert_arc(1, 2).expect("1->2");
    graph.insert_arc(2, 0).expect("2->0");
    graph
}

/// A directed star on 4 nodes: node 0 sends an arc to each of the other 3.
#[must_use]
pub fn four_node_star() -> Graph {
    let mut graph = Graph::new(4);
    graph.insert_arc(0, 1).expect("0->1");
    graph.insert_arc(0, 2).expect("0->2");
    graph.insert_arc(0, 3).expect("0->3");
    graph
}

/// The 3-cycle with a binary `sex` attribute loaded, for exercising
/// attribute-dependent statistics without repeating the setup in every
/// calling test.
#[must_use]
pub fn three_node_cycle_with_sex_attribute() -> Graph {
    let mut graph = three_node_cycle();
    graph
        .load_attribute(
            "sex",
            NodeAttributes::Binary(vec![Some(true), Some(true), Some(false)]),
        )
        .expect("load sex");
    graph
}

/// A `Pcg64` seeded deterministically from `seed`, for reproducible sampler
/// and estimation tests.
#[must_use]
pub fn seeded_rng(seed: u64) -> Pcg64 {
    Pcg64::seed_from_u64(seed)
}
