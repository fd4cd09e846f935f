//! Final compaction of node indices.

use indexmap::IndexMap;
use petgraph::stable_graph::NodeIndex;

use crate::attributes::{ContractGraph, ContractedGraph};

/// Moves surviving nodes (in graph node order) and edges into a graph with indices 0..nb_nodes.
/// Returns also the map from old to new indices.
pub fn relabel(mut graph: ContractGraph) -> (ContractedGraph, IndexMap<NodeIndex, NodeIndex>) {
    let old_nodes: Vec<NodeIndex> = graph.node_indices().collect();
    let edges: Vec<(NodeIndex, NodeIndex)> = graph
        .edge_indices()
        .filter_map(|e| graph.edge_endpoints(e))
        .collect();
    //
    let mut relabeled = ContractedGraph::with_capacity(old_nodes.len(), edges.len());
    let mut new_index = IndexMap::<NodeIndex, NodeIndex>::with_capacity(old_nodes.len());
    for old in old_nodes {
        if let Some(attr) = graph.remove_node(old) {
            new_index.insert(old, relabeled.add_node(attr));
        }
    }
    for (a, b) in edges {
        relabeled.add_edge(new_index[&a], new_index[&b], ());
    }
    log::debug!("relabel nb_nodes : {}, nb_edges : {}", relabeled.node_count(), relabeled.edge_count());
    (relabeled, new_index)
} // end of relabel
