//! Partition of nodes in clusters homogeneous in features and labels.
//!
//! The partition is computed once before contraction, by k-means on the vectors
//! built in [embed](embed). It is never modified afterwards: nodes removed by contraction
//! just drop out of the graph, surviving nodes keep their cluster.

use anyhow::anyhow;
use cpu_time::ProcessTime;
use indexmap::IndexMap;
use petgraph::stable_graph::NodeIndex;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::SystemTime;

use crate::attributes::ContractGraph;
use crate::params::{Constraint, ContractionParams};

pub mod embed;
pub mod kmeans;
pub mod scaling;

pub use embed::FeatureLabelEmbedding;
pub use kmeans::{KMeans, KMeansResult};

/// cluster of each node, fixed for the whole contraction
#[derive(Debug, Clone)]
pub struct Partition {
    assignment: IndexMap<NodeIndex, usize>,
    nb_cluster: usize,
} // end of struct Partition

impl Partition {
    pub fn new(assignment: IndexMap<NodeIndex, usize>, nb_cluster: usize) -> Self {
        Partition { assignment, nb_cluster }
    }

    ///
    pub fn get_nb_cluster(&self) -> usize {
        self.nb_cluster
    }

    /// cluster of a node, None if node was not in the graph when partition was computed
    pub fn get_cluster(&self, node: NodeIndex) -> Option<usize> {
        self.assignment.get(&node).copied()
    }

    /// number of training nodes of each cluster among nodes present in graph
    pub fn get_training_counts(&self, graph: &ContractGraph) -> Vec<usize> {
        let mut counts = vec![0usize; self.nb_cluster];
        for node in graph.node_indices() {
            if !graph[node].train {
                continue;
            }
            if let Some(c) = self.get_cluster(node) {
                counts[c] += 1;
            }
        }
        counts
    } // end of get_training_counts
} // end of impl Partition

/// computes the partition of graph nodes according to params.constraint.
/// Only the feature label constraint (FL) is implemented.
pub fn partition_graph(
    graph: &ContractGraph,
    params: &ContractionParams,
    rng: &mut Xoshiro256PlusPlus,
) -> Result<Partition, anyhow::Error> {
    if params.constraint != Constraint::FL {
        log::error!("partition_graph : constraint {:?} is not supported", params.constraint);
        return Err(anyhow!("constraint {:?} is not supported, only FL is", params.constraint));
    }
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    //
    let embedding = FeatureLabelEmbedding::new(graph, params)?;
    let result = KMeans::new(params.nb_cluster).fit(embedding.get_data().view(), rng)?;
    let assignment: IndexMap<NodeIndex, usize> = embedding
        .get_nodes()
        .iter()
        .copied()
        .zip(result.get_assignments().iter().copied())
        .collect();
    //
    log::info!(
        "partition_graph sys time(s) {:.2e} cpu time(s) {:.2e}",
        sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.),
        cpu_start.elapsed().as_secs_f64()
    );
    Ok(Partition::new(assignment, params.nb_cluster))
} // end of partition_graph
