//! random scores, uniform in \[0,1)

use rand::distributions::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{CentralityMap, ScorerT};
use crate::attributes::ContractGraph;

/// Each live node gets a score drawn from the contraction generator
#[derive(Debug, Copy, Clone, Default)]
pub struct UniformCentrality;

impl ScorerT for UniformCentrality {
    fn score(&self, graph: &ContractGraph, rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error> {
        let uniform = Uniform::<f64>::new(0., 1.);
        let scores = graph
            .node_indices()
            .map(|node| (node, uniform.sample(rng)))
            .collect();
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::fixtures;
    use rand_xoshiro::rand_core::SeedableRng;

    #[test]
    fn uniform_reproducible() {
        let graph = fixtures::ring(10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let first = UniformCentrality.score(&graph, &mut rng).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let second = UniformCentrality.score(&graph, &mut rng).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        assert!(first.values().all(|v| (0. ..1.).contains(v)));
    }
}
