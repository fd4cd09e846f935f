//! Allocation of the removals of a step among clusters.
//!
//! With B the training node budget of the step and T the current number of training nodes,
//! the removal ratio is r = 1 - B/T and cluster c gets quota r * (training nodes in c).
//! The ratio is not clamped: a budget greater than T gives negative quotas (no removal).

use crate::attributes::{count_training, ContractGraph};
use crate::partition::Partition;

/// returns 1 - budget/nb_training. With no training node left the ratio is 0
pub fn removal_ratio(budget: usize, nb_training: usize) -> f64 {
    if nb_training == 0 {
        log::warn!("removal_ratio : no training node left, budget {} ignored", budget);
        return 0.;
    }
    1. - budget as f64 / nb_training as f64
} // end of removal_ratio

/// expected number of removals in each cluster for a step with given budget
pub fn allocate_quotas(graph: &ContractGraph, partition: &Partition, budget: usize) -> Vec<f64> {
    let nb_training = count_training(graph);
    let ratio = removal_ratio(budget, nb_training);
    log::debug!("allocate_quotas nb_training : {}, budget : {}, ratio : {:.3e}", nb_training, budget, ratio);
    partition
        .get_training_counts(graph)
        .into_iter()
        .map(|count| ratio * count as f64)
        .collect()
} // end of allocate_quotas
