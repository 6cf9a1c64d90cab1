//! Basic sampler: proposals are a uniformly drawn ordered pair, with the
//! move type (add/delete) determined by whether the pair is already an arc.

use rand::Rng;

use crate::error::SamplerError;
use crate::graph::Graph;
use crate::types::NodeId;

use super::{SamplerFlags, SamplerKernel};

/// Uniform-unordered-pair proposal kernel.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicSampler;

impl BasicSampler {
    /// Builds a new basic sampler (stateless).
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SamplerKernel for BasicSampler {
    fn propose<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        flags: SamplerFlags,
        rng: &mut R,
    ) -> Result<Option<(NodeId, NodeId, bool)>, SamplerError> {
        let Some((i, j)) = graph.random_ordered_pair(rng) else {
            return Ok(None);
        };
        if flags.forbid_reciprocity && graph.is_arc(j, i) && !graph.is_arc(i, j) {
            return Ok(None);
        }
        let is_delete = graph.is_arc(i, j);
        Ok(Some((i, j, is_delete)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_pcg::Pcg64;
    use rand::SeedableRng;

    #[test]
    fn proposes_delete_for_an_existing_arc_and_add_otherwise() {
        let mut graph = Graph::new(3);
        graph.insert_arc(0, 1).expect("0->1");
        let mut sampler = BasicSampler::new();
        let mut rng = Pcg64::seed_from_u64(1);
        let flags = SamplerFlags::default();
        for _ in 0..64 {
            if let Some((tail, head, is_delete)) =
                sampler.propose(&graph, flags, &mut rng).expect("propose")
            {
                assert_eq!(is_delete, graph.is_arc(tail, head));
            }
        }
    }

    #[test]
    fn forbid_reciprocity_rejects_only_the_reciprocating_add() {
        let mut graph = Graph::new(2);
        graph.insert_arc(0, 1).expect("0->1");
        let mut sampler = BasicSampler::new();
        let mut rng = Pcg64::seed_from_u64(7);
        let flags = SamplerFlags {
            forbid_reciprocity: true,
            ..SamplerFlags::default()
        };
        // A 2-node graph has only two ordered pairs: 0->1 (a delete, always
        // allowed) and 1->0 (an add that would reciprocate, always rejected).
        for _ in 0..32 {
            match sampler.propose(&graph, flags, &mut rng).expect("propose") {
                None => {}
                Some((tail, head, is_delete)) => {
                    assert_eq!((tail, head), (0, 1));
                    assert!(is_delete);
                }
            }
        }
    }
}
