//! node removal by merging into a neighbour

use petgraph::stable_graph::NodeIndex;

use crate::attributes::{ContractGraph, NodeAttr};
use crate::centrality::CentralityMap;

/// Returns the neighbour of node with the strictly largest score, the first one met in case of ties.
/// The node itself (self loop) is never returned.
pub fn best_neighbour(graph: &ContractGraph, node: NodeIndex, scores: &CentralityMap) -> Option<NodeIndex> {
    let mut best: Option<(NodeIndex, f64)> = None;
    for nb in graph.neighbors(node) {
        if nb == node {
            continue;
        }
        let score = scores.get(&nb).copied().unwrap_or(f64::NEG_INFINITY);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((nb, score));
        }
    }
    best.map(|(nb, _)| nb)
} // end of best_neighbour

/// Merges removed into target : every edge of removed is redirected to target, unless it would
/// create a self loop or duplicate an existing edge. target keeps its attributes.
/// Returns the attributes of the removed node.
pub fn merge_into(graph: &mut ContractGraph, target: NodeIndex, removed: NodeIndex) -> Option<NodeAttr> {
    assert_ne!(target, removed);
    let neighbours: Vec<NodeIndex> = graph.neighbors(removed).collect();
    for nb in neighbours {
        if nb == target || nb == removed {
            continue;
        }
        if graph.find_edge(target, nb).is_none() {
            graph.add_edge(target, nb, ());
        }
    }
    graph.remove_node(removed)
} // end of merge_into

#[cfg(test)]
mod tests {

    use super::*;
    use crate::attributes::fixtures;
    use std::collections::HashSet;

    #[test]
    fn merge_neighbourhood() {
        let mut graph = fixtures::path(1);
        let v = graph.node_indices().next().unwrap();
        let attr = graph[v].clone();
        let w = graph.add_node(attr.clone());
        let a = graph.add_node(attr.clone());
        let b = graph.add_node(attr.clone());
        let c = graph.add_node(attr.clone());
        graph.add_edge(v, a, ());
        graph.add_edge(v, b, ());
        graph.add_edge(v, w, ());
        graph.add_edge(v, v, ());
        graph.add_edge(w, b, ());
        graph.add_edge(w, c, ());
        let w_attr = graph[w].clone();
        //
        let removed = merge_into(&mut graph, w, v);
        assert_eq!(removed, Some(attr));
        assert!(!graph.contains_node(v));
        let neighbours: HashSet<NodeIndex> = graph.neighbors(w).collect();
        let expected: HashSet<NodeIndex> = [a, b, c].into_iter().collect();
        assert_eq!(neighbours, expected);
        // no duplicate edge, no self loop
        assert_eq!(graph.neighbors(w).count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph[w], w_attr);
    }

    #[test]
    fn best_neighbour_ties() {
        let graph = fixtures::star(3);
        let nodes: Vec<NodeIndex> = graph.node_indices().collect();
        let mut scores = CentralityMap::new();
        scores.insert(nodes[0], 0.);
        for n in &nodes[1..] {
            scores.insert(*n, 0.5);
        }
        let first = graph.neighbors(nodes[0]).next();
        assert_eq!(best_neighbour(&graph, nodes[0], &scores), first);
        scores.insert(nodes[2], 0.9);
        assert_eq!(best_neighbour(&graph, nodes[0], &scores), Some(nodes[2]));
        assert_eq!(best_neighbour(&graph, nodes[1], &scores), Some(nodes[0]));
    }
}
