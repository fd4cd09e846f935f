//! Contraction Parameters
//!
//!
//!

use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::centrality::Centrality;

/// The partitioning constraint used to keep the node distribution while contracting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Feature Label distribution preserving (k-means on features and labels)
    FL,
    /// Community preserving. Recognized but not supported
    C,
}

impl FromStr for Constraint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FL" => Ok(Constraint::FL),
            "C" => Ok(Constraint::C),
            _ => Err(anyhow!("unknown constraint {}, expecting FL or C", s)),
        }
    }
} // end of impl FromStr for Constraint

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractionParams {
    /// dimension of node features
    pub num_features: usize,
    /// number of classes. In non multilabel mode labels are a single categorical value
    pub num_classes: usize,
    /// centrality measure used to rank nodes at each step
    pub centrality: Centrality,
    ///
    pub constraint: Constraint,
    /// number of k-means clusters
    pub nb_cluster: usize,
    /// balance between features (gamma) and labels (1 - gamma). Must be in \[0,1\]
    pub gamma: f64,
    /// training node budgets, applied in order
    pub steps: Vec<usize>,
    ///
    pub multilabel: bool,
    /// seed of the random generator shared by all the stages of the contraction
    pub seed: u64,
} // end of ContractionParams

impl ContractionParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_features: usize,
        num_classes: usize,
        centrality: Centrality,
        constraint: Constraint,
        nb_cluster: usize,
        gamma: f64,
        steps: Vec<usize>,
        multilabel: bool,
    ) -> Self {
        ContractionParams {
            num_features,
            num_classes,
            centrality,
            constraint,
            nb_cluster,
            gamma,
            steps,
            multilabel,
            seed: 42,
        }
    }

    /// change the seed of the random generator (default is 42)
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed
    }

    ///
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    ///
    pub fn get_nb_cluster(&self) -> usize {
        self.nb_cluster
    }

    ///
    pub fn get_centrality(&self) -> Centrality {
        self.centrality
    }

    ///
    pub fn get_steps(&self) -> &[usize] {
        &self.steps
    }

    /// the dimension of label vectors found in nodes
    pub fn get_label_dim(&self) -> usize {
        if self.multilabel {
            self.num_classes
        } else {
            1
        }
    }

    /// dumps parameters at info level
    pub fn log(&self) {
        log::info!("=============== Graph Contraction ===============");
        log::info!("Centrality Measure: {}", self.centrality);
        log::info!("Constraint: {:?}", self.constraint);
        log::info!("K-Means Cluster: {}", self.nb_cluster);
        log::info!("Gamma: {}", self.gamma);
        log::info!("Contraction steps: {:?}", self.steps);
        log::info!("Multilabel: {}, seed : {}", self.multilabel, self.seed);
    }
} // end of impl ContractionParams

impl Default for ContractionParams {
    fn default() -> Self {
        ContractionParams {
            num_features: 1,
            num_classes: 1,
            centrality: Centrality::Eigenvector,
            constraint: Constraint::FL,
            nb_cluster: 100,
            gamma: 0.5,
            steps: Vec::new(),
            multilabel: true,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parse_constraint() {
        assert_eq!("FL".parse::<Constraint>().unwrap(), Constraint::FL);
        assert_eq!("C".parse::<Constraint>().unwrap(), Constraint::C);
        assert!("METIS".parse::<Constraint>().is_err());
    }

    #[test]
    fn label_dim() {
        let mut params = ContractionParams::default();
        params.num_classes = 7;
        assert_eq!(params.get_label_dim(), 7);
        params.multilabel = false;
        assert_eq!(params.get_label_dim(), 1);
        assert_eq!(params.get_seed(), 42);
    }
} // end of mod tests
