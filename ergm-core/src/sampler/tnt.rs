//! Tie-no-tie (TNT) sampler: an equal-probability choice between a delete
//! branch (draw from the existing arc list) and an add branch
//! (rejection-sample a non-arc pair).
//!
//! No Hastings-ratio correction is applied for the differing selection
//! probabilities of the add/delete branches; the resulting acceptance bias
//! is a recorded open question, not a defect to fix here.

use rand::Rng;

use crate::error::SamplerError;
use crate::graph::Graph;
use crate::types::NodeId;

use super::{propose_add_pair, propose_delete_arc, SamplerFlags, SamplerKernel};

/// Tie-no-tie proposal kernel (stateless).
#[derive(Clone, Copy, Debug, Default)]
pub struct TntSampler;

impl TntSampler {
    /// Builds a new TNT sampler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SamplerKernel for TntSampler {
    fn propose<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        flags: SamplerFlags,
        rng: &mut R,
    ) -> Result<Option<(NodeId, NodeId, bool)>, SamplerError> {
        if rng.gen_bool(0.5) {
            Ok(propose_delete_arc(graph, flags, rng).map(|(tail, head)| (tail, head, true)))
        } else {
            Ok(propose_add_pair(graph, flags, rng)?.map(|(tail, head)| (tail, head, false)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn three_cycle() -> Graph {
        let mut graph = Graph::new(3);
        graph.insert_arc(0, 1).expect("0->1");
        graph.insert_arc(1, 2).expect("1->2");
        graph.insert_arc(2, 0).expect("2->0");
        graph
    }

    #[test]
    fn delete_branch_always_proposes_an_existing_arc() {
        let graph = three_cycle();
        let mut sampler = TntSampler::new();
        let mut rng = Pcg64::seed_from_u64(11);
        for _ in 0..64 {
            if let Some((tail, head, is_delete)) =
                sampler.propose(&graph, SamplerFlags::default(), &mut rng).expect("propose")
            {
                if is_delete {
                    assert!(graph.is_arc(tail, head));
                } else {
                    assert!(!graph.is_arc(tail, head));
                }
            }
        }
    }

    #[test]
    fn add_branch_never_proposes_an_existing_arc() {
        let graph = three_cycle();
        let mut sampler = TntSampler::new();
        let mut rng = Pcg64::seed_from_u64(23);
        for _ in 0..64 {
            match sampler.propose(&graph, SamplerFlags::default(), &mut rng).expect("propose") {
                Some((tail, head, false)) => assert!(!graph.is_arc(tail, head)),
                _ => {}
            }
        }
    }
}
