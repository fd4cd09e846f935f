//! Node importance measures used to order nodes for removal.
//!
//! All measures are recomputed at each contraction step on the graph as it stands.
//! They treat the graph as simple: parallel edges count once and self loops are ignored.
//!
//! The measure is selected by [Centrality], each variant but [Centrality::Undefined] provides
//! a scorer satisfying [ScorerT].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use petgraph::stable_graph::NodeIndex;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::attributes::ContractGraph;

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;
pub mod uniform;

pub use betweenness::BetweennessCentrality;
pub use closeness::ClosenessCentrality;
pub use degree::DegreeCentrality;
pub use eigenvector::EigenvectorCentrality;
pub use pagerank::PageRank;
pub use uniform::UniformCentrality;

/// score of each node, iterated in graph node order
pub type CentralityMap = IndexMap<NodeIndex, f64>;

/// The trait satisfied by all centrality measures.
/// The random generator is the one shared by the whole contraction, measures that do not sample ignore it.
pub trait ScorerT {
    fn score(&self, graph: &ContractGraph, rng: &mut Xoshiro256PlusPlus) -> Result<CentralityMap, anyhow::Error>;
} // end of trait ScorerT

/// The centrality measures available. Parsed from their usual short names
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Centrality {
    /// betweenness, estimated from 100 sampled sources. "BC"
    Betweenness,
    /// "DC"
    Degree,
    /// "PR"
    PageRank,
    /// "EC"
    Eigenvector,
    /// "CC"
    Closeness,
    /// uniform random scores. "RAND"
    Random,
    /// anything else. No score, contraction steps are skipped.
    Undefined,
}

impl Centrality {
    /// returns the scorer with the constants used in contraction, None for Undefined
    pub fn get_scorer(&self) -> Option<Box<dyn ScorerT>> {
        match self {
            Centrality::Betweenness => Some(Box::new(BetweennessCentrality::default())),
            Centrality::Degree => Some(Box::new(DegreeCentrality)),
            Centrality::PageRank => Some(Box::new(PageRank::default())),
            Centrality::Eigenvector => Some(Box::new(EigenvectorCentrality::default())),
            Centrality::Closeness => Some(Box::new(ClosenessCentrality)),
            Centrality::Random => Some(Box::new(UniformCentrality)),
            Centrality::Undefined => None,
        }
    }
} // end of impl Centrality

/// never fails, unknown names give [Centrality::Undefined]
impl FromStr for Centrality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let centrality = match s {
            "BC" => Centrality::Betweenness,
            "DC" => Centrality::Degree,
            "PR" => Centrality::PageRank,
            "EC" => Centrality::Eigenvector,
            "CC" => Centrality::Closeness,
            "RAND" => Centrality::Random,
            _ => {
                log::warn!("centrality {} is not known, contraction steps will be skipped", s);
                Centrality::Undefined
            }
        };
        Ok(centrality)
    }
} // end of impl FromStr for Centrality

impl fmt::Display for Centrality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Centrality::Betweenness => "BC",
            Centrality::Degree => "DC",
            Centrality::PageRank => "PR",
            Centrality::Eigenvector => "EC",
            Centrality::Closeness => "CC",
            Centrality::Random => "RAND",
            Centrality::Undefined => "undefined",
        };
        write!(f, "{}", name)
    }
}

//=======================================================================================

/// A snapshot of the graph adjacency with nodes ranked in `0..nb_nodes` in graph node order.
/// Neighbour lists are sorted, without duplicates and without self loops.
pub(crate) struct DenseAdjacency {
    nodes: Vec<NodeIndex>,
    neighbours: Vec<Vec<usize>>,
}

impl DenseAdjacency {
    pub(crate) fn new(graph: &ContractGraph) -> Self {
        let rank: IndexMap<NodeIndex, usize> = graph
            .node_indices()
            .enumerate()
            .map(|(i, node)| (node, i))
            .collect();
        let neighbours = graph
            .node_indices()
            .map(|node| {
                let mut nbs: Vec<usize> = graph
                    .neighbors(node)
                    .filter(|nb| *nb != node)
                    .map(|nb| rank[&nb])
                    .collect();
                nbs.sort_unstable();
                nbs.dedup();
                nbs
            })
            .collect();
        let nodes = rank.into_keys().collect();
        DenseAdjacency { nodes, neighbours }
    }

    pub(crate) fn get_nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get_neighbours(&self, rank: usize) -> &[usize] {
        &self.neighbours[rank]
    }

    /// breadth first distances from source, None for unreachable nodes. Returns also nodes in visit order
    pub(crate) fn bfs(&self, source: usize) -> (Vec<Option<usize>>, Vec<usize>) {
        let mut dist: Vec<Option<usize>> = vec![None; self.get_nb_nodes()];
        let mut order = Vec::<usize>::with_capacity(self.get_nb_nodes());
        let mut queue = std::collections::VecDeque::<usize>::new();
        dist[source] = Some(0);
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let d_v = dist[v].unwrap_or(0);
            for &w in &self.neighbours[v] {
                if dist[w].is_none() {
                    dist[w] = Some(d_v + 1);
                    queue.push_back(w);
                }
            }
        }
        (dist, order)
    } // end of bfs

    /// associate scores (given by rank) to graph nodes
    pub(crate) fn to_centrality_map(&self, scores: Vec<f64>) -> CentralityMap {
        assert_eq!(scores.len(), self.nodes.len());
        self.nodes.iter().copied().zip(scores).collect()
    }
} // end of impl DenseAdjacency

//=======================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::fixtures;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn parse_centrality() {
        log_init_test();
        assert_eq!("BC".parse::<Centrality>().unwrap(), Centrality::Betweenness);
        assert_eq!("RAND".parse::<Centrality>().unwrap(), Centrality::Random);
        assert_eq!("XX".parse::<Centrality>().unwrap(), Centrality::Undefined);
        for name in ["BC", "DC", "PR", "EC", "CC", "RAND"] {
            let centrality = name.parse::<Centrality>().unwrap();
            assert_eq!(centrality.to_string(), name);
            assert!(centrality.get_scorer().is_some());
        }
        assert!(Centrality::Undefined.get_scorer().is_none());
    }

    #[test]
    fn adjacency_after_removal() {
        log_init_test();
        let mut graph = fixtures::path(4);
        let mut nodes: Vec<NodeIndex> = graph.node_indices().collect();
        // a parallel edge and a self loop must not show up
        graph.add_edge(nodes[0], nodes[1], ());
        graph.add_edge(nodes[3], nodes[3], ());
        graph.remove_node(nodes[1]);
        nodes.remove(1);
        let adjacency = DenseAdjacency::new(&graph);
        assert_eq!(adjacency.get_nb_nodes(), 3);
        assert!(adjacency.get_neighbours(0).is_empty());
        assert_eq!(adjacency.get_neighbours(1), &[2]);
        assert_eq!(adjacency.get_neighbours(2), &[1]);
        let (dist, _) = adjacency.bfs(1);
        assert_eq!(dist, vec![None, Some(0), Some(1)]);
        let map = adjacency.to_centrality_map(vec![0., 1., 2.]);
        let keys: Vec<NodeIndex> = map.keys().copied().collect();
        assert_eq!(keys, nodes);
    }
} // end of mod tests
