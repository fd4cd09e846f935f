//! degree centrality, degree divided by the maximal possible degree n-1

use rand_xoshiro::Xoshiro256PlusPlus;

use super::{CentralityMap, DenseAdjacency, ScorerT};
use crate::attributes::ContractGraph;

#[derive(Debug, Copy, Clone, Default)]
pub struct DegreeCentrality;

impl ScorerT for DegreeCentrality {
    fn score(&self, graph: &ContractGraph, _rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error> {
        let adjacency = DenseAdjacency::new(graph);
        let nb_nodes = adjacency.get_nb_nodes();
        // a single node graph gets score 1
        if nb_nodes <= 1 {
            return Ok(adjacency.to_centrality_map(vec![1.; nb_nodes]));
        }
        let scale = 1. / (nb_nodes - 1) as f64;
        let scores = (0..nb_nodes)
            .map(|i| adjacency.get_neighbours(i).len() as f64 * scale)
            .collect();
        Ok(adjacency.to_centrality_map(scores))
    }
} // end of impl ScorerT for DegreeCentrality

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::fixtures;
    use rand_xoshiro::rand_core::SeedableRng;

    #[test]
    fn degree_star() {
        let graph = fixtures::star(4);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let scores = DegreeCentrality.score(&graph, &mut rng).unwrap();
        let values: Vec<f64> = scores.values().copied().collect();
        assert_eq!(values[0], 1.);
        for v in &values[1..] {
            assert!((v - 0.25).abs() < 1.0e-12);
        }
    }
} // end of mod tests
