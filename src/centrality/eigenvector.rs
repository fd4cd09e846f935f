//! eigenvector centrality by power iteration on A + I, starting from a constant vector.
//!
//! The shift by the identity makes the iteration converge on bipartite graphs too.
//! Iterates are L2 normalized, convergence when the L1 change is less than nb_nodes * tol.

use anyhow::anyhow;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{CentralityMap, DenseAdjacency, ScorerT};
use crate::attributes::ContractGraph;

#[derive(Debug, Copy, Clone)]
pub struct EigenvectorCentrality {
    pub max_iter: usize,
    pub tol: f64,
}

impl EigenvectorCentrality {
    pub fn new(max_iter: usize, tol: f64) -> Self {
        EigenvectorCentrality { max_iter, tol }
    }
}

impl Default for EigenvectorCentrality {
    fn default() -> Self {
        EigenvectorCentrality { max_iter: 10000, tol: 1.0e-6 }
    }
}

impl ScorerT for EigenvectorCentrality {
    fn score(&self, graph: &ContractGraph, _rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error> {
        let adjacency = DenseAdjacency::new(graph);
        let nb_nodes = adjacency.get_nb_nodes();
        if nb_nodes == 0 {
            log::error!("eigenvector centrality of an empty graph");
            return Err(anyhow!("cannot compute eigenvector centrality of an empty graph"));
        }
        let mut x = vec![1. / nb_nodes as f64; nb_nodes];
        for iter in 0..self.max_iter {
            let xlast = x.clone();
            for (v, xv) in xlast.iter().enumerate() {
                for &w in adjacency.get_neighbours(v) {
                    x[w] += xv;
                }
            }
            let mut norm = x.iter().map(|xv| xv * xv).sum::<f64>().sqrt();
            if norm <= 0. {
                norm = 1.;
            }
            x.iter_mut().for_each(|xv| *xv /= norm);
            //
            let err: f64 = x.iter().zip(xlast.iter()).map(|(a, b)| (a - b).abs()).sum();
            if err < nb_nodes as f64 * self.tol {
                log::debug!("eigenvector centrality converged at iteration {}", iter);
                return Ok(adjacency.to_centrality_map(x));
            }
        }
        log::error!("eigenvector centrality did not converge in {} iterations", self.max_iter);
        Err(anyhow!("eigenvector centrality did not converge in {} iterations", self.max_iter))
    }
} // end of impl ScorerT for EigenvectorCentrality

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::fixtures;
    use rand_xoshiro::rand_core::SeedableRng;

    #[test]
    fn eigenvector_ring_uniform() {
        let graph = fixtures::ring(6);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let scores = EigenvectorCentrality::default().score(&graph, &mut rng).unwrap();
        let expected = 1. / 6f64.sqrt();
        assert!(scores.values().all(|v| (v - expected).abs() < 1.0e-6));
    }

    #[test]
    fn eigenvector_star_center() {
        let graph = fixtures::star(4);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let scores = EigenvectorCentrality::default().score(&graph, &mut rng).unwrap();
        let values: Vec<f64> = scores.values().copied().collect();
        // leading eigenvector of a star : center is sqrt(nb_leaves) times a leaf
        assert!((values[0] / values[1] - 2.).abs() < 1.0e-3);
    }

    #[test]
    fn eigenvector_empty() {
        let graph = ContractGraph::default();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        assert!(EigenvectorCentrality::default().score(&graph, &mut rng).is_err());
    }
}
