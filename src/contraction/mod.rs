//! Hierarchical contraction of a training graph.
//!
//! The graph is partitioned once (see [crate::partition]), then each budget of the schedule
//! is applied in turn by the [Contractor]:
//!
//! - node centralities are computed on the current graph and removal quotas are allocated to clusters
//! - nodes are visited by increasing centrality (ties broken at random) and training nodes are removed
//!   with a probability given by the quota of their cluster
//! - a removed node is merged into its most central neighbour, or just deleted if isolated.
//!
//! At the end nodes are relabeled in 0..nb_nodes.

pub mod engine;
pub mod merge;
pub mod quota;
pub mod relabel;

pub use engine::{contract_graph, Contractor};

/// The successive states of a contraction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContractionState {
    Idle,
    Partitioned,
    /// running step of given rank in schedule
    StepRunning(usize),
    StepDone(usize),
    Finalized,
}

/// What happened during a step
#[derive(Debug, Clone)]
pub struct StepReport {
    /// rank of step in schedule
    pub step: usize,
    /// training node budget
    pub budget: usize,
    /// true if the centrality was undefined and nothing was done
    pub skipped: bool,
    pub nb_nodes_before: usize,
    pub nb_edges_before: usize,
    pub nb_nodes_after: usize,
    pub nb_edges_after: usize,
    /// removals done by merging into a neighbour
    pub nb_merged: usize,
    /// removals of isolated nodes
    pub nb_deleted: usize,
    /// quotas at beginning of the step
    pub quotas: Vec<f64>,
    /// number of nodes removed in each cluster
    pub removed_by_cluster: Vec<usize>,
} // end of struct StepReport

impl StepReport {
    pub(crate) fn new(step: usize, budget: usize, nb_nodes: usize, nb_edges: usize, nb_cluster: usize) -> Self {
        StepReport {
            step,
            budget,
            skipped: false,
            nb_nodes_before: nb_nodes,
            nb_edges_before: nb_edges,
            nb_nodes_after: nb_nodes,
            nb_edges_after: nb_edges,
            nb_merged: 0,
            nb_deleted: 0,
            quotas: vec![0.; nb_cluster],
            removed_by_cluster: vec![0; nb_cluster],
        }
    }

    /// total number of nodes removed during the step
    pub fn get_nb_removed(&self) -> usize {
        self.nb_merged + self.nb_deleted
    }

    pub fn log(&self) {
        if self.skipped {
            log::info!("step {} (budget {}) skipped", self.step, self.budget);
            return;
        }
        log::info!("step {}, budget : {}", self.step, self.budget);
        log::info!("Pre-contraction graph nodes: {}", self.nb_nodes_before);
        log::info!("Pre-contraction graph edges: {}", self.nb_edges_before);
        log::info!("Post-contraction graph nodes: {}", self.nb_nodes_after);
        log::info!("Post-contraction graph edges: {}", self.nb_edges_after);
        log::info!("nb merged : {}, nb deleted : {}", self.nb_merged, self.nb_deleted);
    }
} // end of impl StepReport
