//! Builds the vectors used to cluster nodes from their features and labels.
//!
//! Features (matrix X) and labels (matrix Y, one hot encoded if labels are categorical) are min max scaled
//! per column, then weighted so that neither space dominates distances because of its dimension:
//!
//!  - X *= sqrt(gamma) * sqrt(max(F,C)/F)
//!  - Y *= sqrt(1-gamma) * sqrt(max(F,C)/C)
//!
//! where F is num_features and C num_classes. The result is the concatenation \[X Y\].

use anyhow::anyhow;
use ndarray::{concatenate, Array2, Axis};
use petgraph::stable_graph::NodeIndex;

use super::scaling::{MinMaxScaler, OneHotEncoder};
use crate::attributes::ContractGraph;
use crate::params::ContractionParams;

/// The rows of the feature label matrix and the node each row corresponds to.
pub struct FeatureLabelEmbedding {
    /// nodes in graph order, row i of data is nodes\[i\]
    nodes: Vec<NodeIndex>,
    ///
    data: Array2<f64>,
} // end of struct FeatureLabelEmbedding

impl FeatureLabelEmbedding {
    ///
    pub fn get_nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    ///
    pub fn get_data(&self) -> &Array2<f64> {
        &self.data
    }

    /// compute weighted feature label vectors of all nodes of graph
    pub fn new(graph: &ContractGraph, params: &ContractionParams) -> Result<Self, anyhow::Error> {
        let num_features = params.num_features;
        let num_classes = params.num_classes;
        if num_features == 0 || num_classes == 0 {
            log::error!("FeatureLabelEmbedding num_features : {}, num_classes : {}", num_features, num_classes);
            return Err(anyhow!("num_features and num_classes must be positive"));
        }
        if !(0. ..=1.).contains(&params.gamma) {
            return Err(anyhow!("gamma must be in [0,1], got {}", params.gamma));
        }
        let label_dim = params.get_label_dim();
        //
        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        let nb_nodes = nodes.len();
        let mut x = Array2::<f64>::zeros((nb_nodes, num_features));
        let mut y = Array2::<f64>::zeros((nb_nodes, label_dim));
        for (i, node) in nodes.iter().enumerate() {
            let attr = &graph[*node];
            if attr.x.len() != num_features {
                log::error!("node {:?} has {} features, expected {}", node, attr.x.len(), num_features);
                return Err(anyhow!("node {} has {} features, expected {}", node.index(), attr.x.len(), num_features));
            }
            if attr.y.len() != label_dim {
                log::error!("node {:?} has labels of dim {}, expected {}", node, attr.y.len(), label_dim);
                return Err(anyhow!("node {} has labels of dim {}, expected {}", node.index(), attr.y.len(), label_dim));
            }
            x.row_mut(i).iter_mut().zip(attr.x.iter()).for_each(|(a, b)| *a = *b);
            y.row_mut(i).iter_mut().zip(attr.y.iter()).for_each(|(a, b)| *a = *b);
        }
        //
        if !params.multilabel {
            let values: Vec<f64> = y.column(0).to_vec();
            let encoder = OneHotEncoder::fit(&values);
            y = encoder.transform(&values);
        }
        //
        MinMaxScaler::fit(&x).transform(&mut x);
        MinMaxScaler::fit(&y).transform(&mut y);
        let max_dim = num_features.max(num_classes) as f64;
        let x_weight = params.gamma.sqrt() * (max_dim / num_features as f64).sqrt();
        let y_weight = (1. - params.gamma).sqrt() * (max_dim / num_classes as f64).sqrt();
        x *= x_weight;
        y *= y_weight;
        log::debug!("FeatureLabelEmbedding x weight : {:.3e}, y weight : {:.3e}", x_weight, y_weight);
        //
        let data = concatenate(Axis(1), &[x.view(), y.view()])?;
        Ok(FeatureLabelEmbedding { nodes, data })
    } // end of new
} // end of impl FeatureLabelEmbedding
