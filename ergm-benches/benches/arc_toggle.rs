//! Arc insertion/removal cost across graph sizes.
//!
//! Isolates the `O(1)` arc-toggle path from statistic evaluation and
//! sampler overhead.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ergm_benches::fixtures::random_digraph;
use ergm_benches::params::GraphBenchParams;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 1_000, 10_000];

/// Target arc density for every generated graph.
const DENSITY: f64 = 0.01;

fn arc_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("arc_toggle");

    for &node_count in NODE_COUNTS {
        let params = GraphBenchParams {
            node_count,
            density: DENSITY,
        };
        let graph = random_digraph(&params);
        let (tail, head) = graph
            .arcs()
            .next()
            .map_or((0, 1), |(tail, head)| (tail, head));

        group.bench_with_input(BenchmarkId::from_parameter(&params), &graph, |b, graph| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| {
                    let new_head = if head + 1 < node_count as u32 { head + 1 } else { 0 };
                    graph.insert_arc(tail, new_head).ok();
                    graph.remove_arc(tail, new_head).ok();
                    graph
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, arc_toggle);
criterion_main!(benches);
