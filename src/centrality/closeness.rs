//! closeness centrality with the Wasserman Faust correction for disconnected graphs.
//!
//! For a node reaching r nodes (itself included) at total distance d the score is
//! ((r-1)/d) * ((r-1)/(n-1))

use rand_xoshiro::Xoshiro256PlusPlus;

use super::{CentralityMap, DenseAdjacency, ScorerT};
use crate::attributes::ContractGraph;

#[derive(Debug, Copy, Clone, Default)]
pub struct ClosenessCentrality;

impl ScorerT for ClosenessCentrality {
    fn score(&self, graph: &ContractGraph, _rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error> {
        let adjacency = DenseAdjacency::new(graph);
        let nb_nodes = adjacency.get_nb_nodes();
        let scores = (0..nb_nodes)
            .map(|v| {
                let (dist, _) = adjacency.bfs(v);
                let reached: Vec<usize> = dist.into_iter().flatten().collect();
                let total: usize = reached.iter().sum();
                if total > 0 && nb_nodes > 1 {
                    let nb_reached = (reached.len() - 1) as f64;
                    (nb_reached / total as f64) * (nb_reached / (nb_nodes - 1) as f64)
                } else {
                    0.
                }
            })
            .collect();
        Ok(adjacency.to_centrality_map(scores))
    }
} // end of impl ScorerT for ClosenessCentrality
