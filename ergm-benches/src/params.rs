//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so `criterion`
//! benchmark IDs carry a readable label instead of a bare integer.

use std::fmt;

/// Parameters for a synthetic random digraph used across the benchmarks.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes in the generated graph.
    pub node_count: usize,
    /// Target arc density, as a fraction of the `node_count * (node_count -
    /// 1)` ordered pairs.
    pub density: f64,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},density={}", self.node_count, self.density)
    }
}

/// Parameters for a sampler-throughput benchmark run, naming the kernel and
/// two-path backend under test alongside the graph size.
#[derive(Clone, Debug)]
pub struct SamplerBenchParams {
    /// Number of nodes in the generated graph.
    pub node_count: usize,
    /// Sampler kernel label (`basic`, `tnt`, `ifd`).
    pub kernel: &'static str,
    /// Two-path backend label (`dense`, `sparse`, `disabled`).
    pub two_path_backend: &'static str,
}

impl fmt::Display for SamplerBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},kernel={},twopath={}",
            self.node_count, self.kernel, self.two_path_backend,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn graph_bench_params_display() {
        let params = GraphBenchParams {
            node_count: 500,
            density: 0.1,
        };
        assert_eq!(params.to_string(), "n=500,density=0.1");
    }

    #[rstest]
    fn sampler_bench_params_display() {
        let params = SamplerBenchParams {
            node_count: 1_000,
            kernel: "tnt",
            two_path_backend: "dense",
        };
        assert_eq!(params.to_string(), "n=1000,kernel=tnt,twopath=dense");
    }
}
