//! This module describes the node data we attach to petgraph nodes.
//!
//! Each node carries a feature vector, a label vector and a training flag.
//! Edges carry no data: the graph is undirected and unweighted.
//!
//! During contraction the graph is held as a [StableGraph] so that node indices of surviving nodes
//! are not moved when other nodes are removed.

use petgraph::graph::Graph;
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;

use serde::{Deserialize, Serialize};

/// Data associated to a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAttr {
    /// features, dimension is num_features
    pub x: Vec<f64>,
    /// labels. dimension is num_classes in multilabel mode, else 1 (a categorical value)
    pub y: Vec<f64>,
    /// only training nodes can be removed
    pub train: bool,
} // end of struct NodeAttr

impl NodeAttr {
    pub fn new(x: Vec<f64>, y: Vec<f64>, train: bool) -> Self {
        NodeAttr { x, y, train }
    }

    /// get features
    pub fn get_features(&self) -> &[f64] {
        &self.x
    }

    /// get labels
    pub fn get_labels(&self) -> &[f64] {
        &self.y
    }

    ///
    pub fn is_train(&self) -> bool {
        self.train
    }
} // end of impl NodeAttr

/// The graph mutated by contraction. Indices stay valid across node removals.
pub type ContractGraph = StableGraph<NodeAttr, (), Undirected>;

/// The graph returned after relabeling, node indices are `0..nb_nodes`
pub type ContractedGraph = Graph<NodeAttr, (), Undirected>;

/// returns the number of nodes with train flag set
pub fn count_training(graph: &ContractGraph) -> usize {
    graph
        .node_indices()
        .filter(|idx| graph[*idx].train)
        .count()
} // end of count_training

//==========================================================================================

// end of mod fixtures
