//! PageRank by power iteration.
//!
//! An undirected edge is followed in both directions. Nodes without neighbours (dangling)
//! spread their mass uniformly. Convergence is declared when the L1 change between 2 iterations
//! is less than nb_nodes * tol.

use anyhow::anyhow;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{CentralityMap, DenseAdjacency, ScorerT};
use crate::attributes::ContractGraph;

#[derive(Debug, Copy, Clone)]
pub struct PageRank {
    /// damping factor
    pub alpha: f64,
    ///
    pub max_iter: usize,
    ///
    pub tol: f64,
}

impl PageRank {
    pub fn new(alpha: f64, max_iter: usize, tol: f64) -> Self {
        PageRank { alpha, max_iter, tol }
    }
}

impl Default for PageRank {
    fn default() -> Self {
        PageRank { alpha: 0.85, max_iter: 100, tol: 1.0e-6 }
    }
}

impl ScorerT for PageRank {
    fn score(&self, graph: &ContractGraph, _rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error> {
        let adjacency = DenseAdjacency::new(graph);
        let nb_nodes = adjacency.get_nb_nodes();
        if nb_nodes == 0 {
            return Ok(CentralityMap::new());
        }
        let uniform = 1. / nb_nodes as f64;
        let mut x = vec![uniform; nb_nodes];
        //
        for iter in 0..self.max_iter {
            let xlast = x;
            x = vec![0.; nb_nodes];
            let mut dangling_sum = 0.;
            for (v, xv) in xlast.iter().enumerate() {
                let neighbours = adjacency.get_neighbours(v);
                if neighbours.is_empty() {
                    dangling_sum += xv;
                } else {
                    let share = self.alpha * xv / neighbours.len() as f64;
                    for &w in neighbours {
                        x[w] += share;
                    }
                }
            }
            let spread = (self.alpha * dangling_sum + 1. - self.alpha) * uniform;
            x.iter_mut().for_each(|xv| *xv += spread);
            //
            let err: f64 = x.iter().zip(xlast.iter()).map(|(a, b)| (a - b).abs()).sum();
            if err < nb_nodes as f64 * self.tol {
                log::debug!("pagerank converged at iteration {}", iter);
                return Ok(adjacency.to_centrality_map(x));
            }
        }
        log::error!("pagerank did not converge in {} iterations", self.max_iter);
        Err(anyhow!("pagerank did not converge in {} iterations", self.max_iter))
    }
} // end of impl ScorerT for PageRank

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::fixtures;
    use rand_xoshiro::rand_core::SeedableRng;

    #[test]
    fn pagerank_star() {
        let graph = fixtures::star(6);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let scores = PageRank::default().score(&graph, &mut rng).unwrap();
        let values: Vec<f64> = scores.values().copied().collect();
        let total: f64 = values.iter().sum();
        assert!((total - 1.).abs() < 1.0e-6);
        assert!(values[1..].iter().all(|v| *v < values[0]));
    }

    #[test]
    fn pagerank_no_convergence() {
        let graph = fixtures::path(10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let res = PageRank::new(0.85, 1, 1.0e-12).score(&graph, &mut rng);
        assert!(res.is_err());
    }
}
