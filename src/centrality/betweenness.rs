//! Betweenness centrality estimated with Brandes accumulation from a sample of source nodes.
//!
//! - Brandes (2001). _A faster algorithm for betweenness centrality_
//! - Brandes Pich (2007). _Centrality estimation in large networks_
//!
//! Scores are normalized by 1/((n-1)(n-2)) and rescaled by n/k where k is the number of sources.

use rand::seq::index;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{CentralityMap, DenseAdjacency, ScorerT};
use crate::attributes::ContractGraph;

#[derive(Debug, Copy, Clone)]
pub struct BetweennessCentrality {
    /// number of sampled sources. If the graph is smaller all nodes are sources.
    pub nb_sample: usize,
}

impl BetweennessCentrality {
    pub fn new(nb_sample: usize) -> Self {
        BetweennessCentrality { nb_sample }
    }
}

impl Default for BetweennessCentrality {
    fn default() -> Self {
        BetweennessCentrality { nb_sample: 100 }
    }
}

impl ScorerT for BetweennessCentrality {
    fn score(&self, graph: &ContractGraph, rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error> {
        let adjacency = DenseAdjacency::new(graph);
        let nb_nodes = adjacency.get_nb_nodes();
        let nb_sources = self.nb_sample.min(nb_nodes);
        let sources: Vec<usize> = if nb_sources < nb_nodes {
            index::sample(rng, nb_nodes, nb_sources).into_vec()
        } else {
            (0..nb_nodes).collect()
        };
        log::debug!("betweenness nb_nodes : {}, nb sources : {}", nb_nodes, nb_sources);
        //
        let mut betweenness = vec![0f64; nb_nodes];
        for s in sources {
            accumulate_source(&adjacency, s, &mut betweenness);
        }
        // each pair is seen in both directions, normalization over ordered pairs
        if nb_nodes > 2 {
            let scale = nb_nodes as f64 / (((nb_nodes - 1) * (nb_nodes - 2)) as f64 * nb_sources as f64);
            betweenness.iter_mut().for_each(|b| *b *= scale);
        }
        Ok(adjacency.to_centrality_map(betweenness))
    }
} // end of impl ScorerT for BetweennessCentrality

// one source of Brandes algorithm : forward bfs counting shortest paths, backward dependency accumulation
fn accumulate_source(adjacency: &DenseAdjacency, source: usize, betweenness: &mut [f64]) {
    let nb_nodes = adjacency.get_nb_nodes();
    let mut sigma = vec![0f64; nb_nodes];
    let mut dist: Vec<Option<usize>> = vec![None; nb_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); nb_nodes];
    let mut order = Vec::<usize>::with_capacity(nb_nodes);
    let mut queue = std::collections::VecDeque::<usize>::new();
    //
    sigma[source] = 1.;
    dist[source] = Some(0);
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        order.push(v);
        let d_v = dist[v].unwrap_or(0);
        for &w in adjacency.get_neighbours(v) {
            if dist[w].is_none() {
                dist[w] = Some(d_v + 1);
                queue.push_back(w);
            }
            if dist[w] == Some(d_v + 1) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }
    //
    let mut delta = vec![0f64; nb_nodes];
    for &w in order.iter().rev() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1. + delta[w]);
        }
        if w != source {
            betweenness[w] += delta[w];
        }
    }
} // end of accumulate_source

// end of mod tests
