//! The contraction driver.
//!
//! A [Contractor] owns the parameters and the random generator of one contraction.
//! The generator is seeded from the parameters and used, in this order, by the k-means partitioning
//! and at each step by the centrality (betweenness sampling, random scores), the shuffle of candidates
//! and the acceptance draws. So a contraction is reproducible from its seed.
//!
//! The quota of a cluster is consumed as an acceptance probability: each visited training node of a cluster
//! with positive quota q is removed with probability min(q,1) and q is decreased by 1 whatever the outcome.
//! The expected number of removals in the cluster is thus q, as long as the cluster has enough training nodes.

use anyhow::anyhow;
use cpu_time::ProcessTime;
use indexmap::IndexMap;
use petgraph::stable_graph::NodeIndex;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::SystemTime;

use super::merge::{best_neighbour, merge_into};
use super::quota::allocate_quotas;
use super::relabel::relabel;
use super::{ContractionState, StepReport};
use crate::attributes::{ContractGraph, ContractedGraph};
use crate::params::ContractionParams;
use crate::partition::{partition_graph, Partition};

pub struct Contractor {
    params: ContractionParams,
    /// the only source of randomness of the contraction
    rng: Xoshiro256PlusPlus,
    state: ContractionState,
    partition: Option<Partition>,
    reports: Vec<StepReport>,
} // end of struct Contractor

impl Contractor {
    pub fn new(params: ContractionParams) -> Self {
        let rng = Xoshiro256PlusPlus::seed_from_u64(params.get_seed());
        Contractor {
            params,
            rng,
            state: ContractionState::Idle,
            partition: None,
            reports: Vec::new(),
        }
    }

    ///
    pub fn get_params(&self) -> &ContractionParams {
        &self.params
    }

    /// current state of the contraction
    pub fn get_state(&self) -> ContractionState {
        self.state
    }

    /// the partition, once computed
    pub fn get_partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// reports of steps done
    pub fn get_reports(&self) -> &[StepReport] {
        &self.reports
    }

    /// Partitions the graph and runs all the steps of the schedule, mutating graph.
    /// Node indices are not modified, see [contract](Self::contract) to get the final relabeled graph.
    pub fn contract_in_place(&mut self, graph: &mut ContractGraph) -> Result<(), anyhow::Error> {
        if self.state != ContractionState::Idle {
            log::error!("Contractor already used, state : {:?}", self.state);
            return Err(anyhow!("a Contractor can run only one contraction"));
        }
        self.params.log();
        log::info!("Pre-contraction graph nodes: {}", graph.node_count());
        log::info!("Pre-contraction graph edges: {}", graph.edge_count());
        //
        let partition = partition_graph(graph, &self.params, &mut self.rng)?;
        self.partition = Some(partition);
        self.state = ContractionState::Partitioned;
        //
        let steps = self.params.get_steps().to_vec();
        for (step, budget) in steps.into_iter().enumerate() {
            self.state = ContractionState::StepRunning(step);
            let report = self.run_step(graph, step, budget)?;
            report.log();
            self.reports.push(report);
            self.state = ContractionState::StepDone(step);
        }
        Ok(())
    } // end of contract_in_place

    /// runs the whole contraction and relabels nodes of resulting graph.
    /// Returns also the map from indices in the input graph to indices in the result.
    pub fn contract_with_index<G>(&mut self, graph: G) -> Result<(ContractedGraph, IndexMap<NodeIndex, NodeIndex>), anyhow::Error>
    where
        G: Into<ContractGraph>,
    {
        let cpu_start = ProcessTime::now();
        let sys_start = SystemTime::now();
        let mut graph: ContractGraph = graph.into();
        self.contract_in_place(&mut graph)?;
        let (relabeled, index) = relabel(graph);
        self.state = ContractionState::Finalized;
        log::info!(
            "contraction done, nb_nodes : {}, nb_edges : {}, sys time(s) {:.2e} cpu time(s) {:.2e}",
            relabeled.node_count(),
            relabeled.edge_count(),
            sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.),
            cpu_start.elapsed().as_secs_f64()
        );
        Ok((relabeled, index))
    } // end of contract_with_index

    /// runs the whole contraction, returns the contracted graph with nodes in 0..nb_nodes
    pub fn contract<G>(&mut self, graph: G) -> Result<ContractedGraph, anyhow::Error>
    where
        G: Into<ContractGraph>,
    {
        self.contract_with_index(graph).map(|(graph, _)| graph)
    }

    // one step of the schedule
    fn run_step(&mut self, graph: &mut ContractGraph, step: usize, budget: usize) -> Result<StepReport, anyhow::Error> {
        let partition = self
            .partition
            .as_ref()
            .ok_or_else(|| anyhow!("run_step called before partitioning"))?;
        let mut report = StepReport::new(step, budget, graph.node_count(), graph.edge_count(), partition.get_nb_cluster());
        //
        let scorer = match self.params.get_centrality().get_scorer() {
            Some(scorer) => scorer,
            None => {
                log::warn!("Centrality Type Undefined, No Contraction Done! (step {})", step);
                report.skipped = true;
                return Ok(report);
            }
        };
        let scores = scorer.score(graph, &mut self.rng)?;
        let mut quotas = allocate_quotas(graph, partition, budget);
        report.quotas = quotas.clone();
        log::debug!("step {} quotas : {:?}", step, quotas);
        // shuffle then stable sort : equal scores come in random order
        let mut candidates: Vec<(NodeIndex, f64)> = scores.iter().map(|(node, s)| (*node, *s)).collect();
        candidates.shuffle(&mut self.rng);
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        //
        let uniform = Uniform::<f64>::new(0., 1.);
        for (node, _) in candidates {
            if !graph.contains_node(node) || !graph[node].train {
                continue;
            }
            let cluster = match partition.get_cluster(node) {
                Some(c) => c,
                None => continue,
            };
            let quota = quotas[cluster];
            if quota <= 0. {
                continue;
            }
            let draw = uniform.sample(&mut self.rng);
            quotas[cluster] -= 1.;
            if draw > quota {
                continue;
            }
            // merge into most central live neighbour, or delete an isolated node
            match best_neighbour(graph, node, &scores) {
                Some(target) => {
                    log::trace!("merging {:?} into {:?}", node, target);
                    merge_into(graph, target, node);
                    report.nb_merged += 1;
                }
                None => {
                    log::trace!("removing isolated {:?}", node);
                    graph.remove_node(node);
                    report.nb_deleted += 1;
                }
            }
            report.removed_by_cluster[cluster] += 1;
        }
        report.nb_nodes_after = graph.node_count();
        report.nb_edges_after = graph.edge_count();
        Ok(report)
    } // end of run_step
} // end of impl Contractor

/// contracts graph according to params. See [Contractor]
pub fn contract_graph<G>(graph: G, params: ContractionParams) -> Result<ContractedGraph, anyhow::Error>
where
    G: Into<ContractGraph>,
{
    Contractor::new(params).contract(graph)
}

//=========================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::{count_training, fixtures, NodeAttr};
    use crate::centrality::Centrality;
    use crate::params::Constraint;
    use petgraph::algo::connected_components;
    use petgraph::graph::Graph;
    use petgraph::Undirected;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sorted_edges(graph: &ContractedGraph) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = graph
            .edge_indices()
            .filter_map(|e| graph.edge_endpoints(e))
            .map(|(a, b)| (a.index().min(b.index()), a.index().max(b.index())))
            .collect();
        edges.sort_unstable();
        edges
    }

    fn ring_params(steps: Vec<usize>) -> ContractionParams {
        ContractionParams::new(2, 1, Centrality::Degree, Constraint::FL, 1, 0.5, steps, true)
    }

    #[test]
    fn ring_to_three() {
        log_init_test();
        let mut contractor = Contractor::new(ring_params(vec![3]));
        let contracted = contractor.contract(fixtures::ring(5)).unwrap();
        assert_eq!(contractor.get_state(), ContractionState::Finalized);
        assert_eq!(contracted.node_count(), 3);
        assert_eq!(connected_components(&contracted), 1);
        let indices: Vec<usize> = contracted.node_indices().map(|n| n.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let report = &contractor.get_reports()[0];
        assert_eq!(report.nb_merged, 2);
        assert_eq!(report.nb_deleted, 0);
        assert!((report.quotas[0] - 2.).abs() < 1.0e-12);
    }

    #[test]
    fn empty_schedule() {
        log_init_test();
        let ring = fixtures::ring(5);
        let input: Graph<NodeAttr, (), Undirected> = Graph::from(ring.clone());
        let mut contractor = Contractor::new(ring_params(vec![]));
        let contracted = contractor.contract(ring).unwrap();
        assert_eq!(contractor.get_state(), ContractionState::Finalized);
        assert!(contractor.get_reports().is_empty());
        assert_eq!(contracted.node_count(), 5);
        for node in contracted.node_indices() {
            assert_eq!(contracted[node], input[node]);
        }
        assert_eq!(sorted_edges(&contracted), sorted_edges(&input));
    }

    #[test]
    fn undefined_centrality_skips() {
        log_init_test();
        let mut params = ring_params(vec![3, 2]);
        params.centrality = "XX".parse::<Centrality>().unwrap();
        let mut contractor = Contractor::new(params);
        let contracted = contractor.contract(fixtures::ring(5)).unwrap();
        assert_eq!(contracted.node_count(), 5);
        assert_eq!(contracted.edge_count(), 5);
        assert_eq!(contractor.get_reports().len(), 2);
        assert!(contractor.get_reports().iter().all(|r| r.skipped));
    }

    #[test]
    fn budget_above_training_count() {
        log_init_test();
        let mut contractor = Contractor::new(ring_params(vec![10]));
        let contracted = contractor.contract(fixtures::ring(5)).unwrap();
        assert_eq!(contracted.node_count(), 5);
        assert!(contractor.get_reports()[0].quotas[0] < 0.);
    }

    #[test]
    fn non_training_nodes_kept() {
        log_init_test();
        let mut graph = fixtures::ring(8);
        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        for node in nodes.iter().step_by(2) {
            graph[*node].train = false;
        }
        // budget 0 : all training nodes are to be removed
        let mut contractor = Contractor::new(ring_params(vec![0]));
        contractor.contract_in_place(&mut graph).unwrap();
        assert_eq!(contractor.get_state(), ContractionState::StepDone(0));
        assert_eq!(count_training(&graph), 0);
        for node in nodes.iter().step_by(2) {
            assert!(graph.contains_node(*node));
        }
    }

    #[test]
    fn contraction_deterministic() {
        log_init_test();
        for centrality in [Centrality::Random, Centrality::Betweenness, Centrality::PageRank, Centrality::Eigenvector, Centrality::Closeness] {
            let params = ContractionParams::new(4, 3, centrality, Constraint::FL, 4, 0.5, vec![40, 25], false);
            let first = contract_graph(fixtures::random_graph(80, 0.08, 5), params.clone()).unwrap();
            let second = contract_graph(fixtures::random_graph(80, 0.08, 5), params).unwrap();
            assert_eq!(first.node_count(), second.node_count());
            for node in first.node_indices() {
                assert_eq!(first[node], second[node]);
            }
            assert_eq!(sorted_edges(&first), sorted_edges(&second));
        }
    }

    #[test]
    fn contraction_reduces() {
        log_init_test();
        let graph = fixtures::random_graph(100, 0.06, 11);
        let nb_nodes = graph.node_count();
        let nb_edges = graph.edge_count();
        let params = ContractionParams::new(4, 3, Centrality::Degree, Constraint::FL, 5, 0.5, vec![60, 40, 20], false);
        let mut contractor = Contractor::new(params);
        let contracted = contractor.contract(graph).unwrap();
        for report in contractor.get_reports() {
            assert!(report.nb_nodes_after <= report.nb_nodes_before);
            assert!(report.nb_edges_after <= report.nb_edges_before);
            assert_eq!(report.nb_nodes_before - report.nb_nodes_after, report.get_nb_removed());
            assert_eq!(report.removed_by_cluster.iter().sum::<usize>(), report.get_nb_removed());
        }
        assert!(contracted.node_count() < nb_nodes);
        assert!(contracted.edge_count() <= nb_edges);
        let indices: Vec<usize> = contracted.node_indices().map(|n| n.index()).collect();
        assert_eq!(indices, (0..contracted.node_count()).collect::<Vec<usize>>());
    }

    #[test]
    fn partition_stable_across_steps() {
        log_init_test();
        let params = ContractionParams::new(4, 3, Centrality::Random, Constraint::FL, 4, 0.5, vec![50, 30], false);
        let mut graph = fixtures::random_graph(80, 0.08, 9);
        let mut reference = Contractor::new(ContractionParams { steps: vec![], ..params.clone() });
        reference.contract_in_place(&mut graph.clone()).unwrap();
        assert_eq!(reference.get_state(), ContractionState::Partitioned);
        let reference = reference.get_partition().unwrap().clone();
        //
        let mut contractor = Contractor::new(params);
        contractor.contract_in_place(&mut graph).unwrap();
        let partition = contractor.get_partition().unwrap();
        for node in graph.node_indices() {
            assert_eq!(partition.get_cluster(node), reference.get_cluster(node));
        }
    }

    #[test]
    fn quota_realized_in_expectation() {
        log_init_test();
        // 3 nodes of one kind, 2 of another : 2 clusters with 3 and 2 training nodes
        let mut graph = ContractGraph::default();
        let nodes: Vec<NodeIndex> = (0..5)
            .map(|i| {
                let kind = if i < 3 { 0. } else { 1. };
                graph.add_node(NodeAttr::new(vec![kind, kind], vec![kind], true))
            })
            .collect();
        for i in 1..5 {
            graph.add_edge(nodes[i - 1], nodes[i], ());
        }
        // budget 4 of 5 training nodes : quotas 0.6 and 0.4
        let nb_run = 2000;
        let mut nb_removed = 0usize;
        for seed in 0..nb_run {
            let mut params = ContractionParams::new(2, 1, Centrality::Random, Constraint::FL, 2, 0.5, vec![4], true);
            params.set_seed(seed);
            let mut contractor = Contractor::new(params);
            contractor.contract_in_place(&mut graph.clone()).unwrap();
            let cluster = contractor.get_partition().unwrap().get_cluster(nodes[0]).unwrap();
            let report = &contractor.get_reports()[0];
            assert!((report.quotas[cluster] - 0.6).abs() < 1.0e-12);
            nb_removed += report.removed_by_cluster[cluster];
        }
        let mean = nb_removed as f64 / nb_run as f64;
        log::info!("mean removals : {:.3e}", mean);
        assert!((mean - 0.6).abs() < 0.05);
    }

    #[test]
    fn too_many_clusters() {
        log_init_test();
        let mut params = ring_params(vec![3]);
        params.nb_cluster = 6;
        let mut contractor = Contractor::new(params);
        assert!(contractor.contract(fixtures::ring(5)).is_err());
        assert_eq!(contractor.get_state(), ContractionState::Idle);
    }
}
