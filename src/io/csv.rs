//! Load or dump a node attributed graph from/to a pair of csv files.
//!
//! The nodes file has a header line and one record by node :
//!
//!   id, train, x_0, ..., x_{F-1}, y_0, ..., y_{L-1}
//!
//! where F is num_features, L is num_classes in multilabel mode and 1 otherwise. train is one of 1, 0, true, false.
//!
//! The edges file has a header line `source,target` and one record by edge, with ids of the nodes file.
//! Edges are undirected, self loops and duplicated edges are dropped at load.

use anyhow::anyhow;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::attributes::{ContractGraph, ContractedGraph, NodeAttr};
use crate::params::ContractionParams;

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    source: u64,
    target: u64,
}

fn open_file(filepath: &Path) -> Result<std::fs::File, anyhow::Error> {
    let fileres = OpenOptions::new().read(true).open(filepath);
    match fileres {
        Ok(file) => Ok(file),
        Err(e) => {
            log::error!("could not open file {:?} : {}", filepath.as_os_str(), e);
            Err(anyhow!("could not open file {:?}", filepath.as_os_str()))
        }
    }
} // end of open_file

fn parse_train(field: &str) -> Result<bool, anyhow::Error> {
    match field.trim() {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        other => Err(anyhow!("cannot parse train flag {}", other)),
    }
}

fn parse_node_record(record: &StringRecord, num_features: usize, label_dim: usize) -> Result<(u64, NodeAttr), anyhow::Error> {
    if record.len() != 2 + num_features + label_dim {
        return Err(anyhow!(
            "node record has {} fields, expected {}",
            record.len(),
            2 + num_features + label_dim
        ));
    }
    let id = record[0].trim().parse::<u64>()?;
    let train = parse_train(&record[1])?;
    let mut values = Vec::<f64>::with_capacity(num_features + label_dim);
    for field in record.iter().skip(2) {
        values.push(field.trim().parse::<f64>()?);
    }
    let y = values.split_off(num_features);
    Ok((id, NodeAttr::new(values, y, train)))
} // end of parse_node_record

/// loads a graph, returns it with the map from ids in file to node indices
pub fn load_graph(
    nodes_path: &Path,
    edges_path: &Path,
    params: &ContractionParams,
    delim: u8,
) -> Result<(ContractGraph, IndexMap<u64, NodeIndex>), anyhow::Error> {
    let num_features = params.num_features;
    let label_dim = params.get_label_dim();
    //
    let file = open_file(nodes_path)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .flexible(false)
        .from_reader(BufReader::new(file));
    let mut graph = ContractGraph::default();
    let mut index = IndexMap::<u64, NodeIndex>::new();
    for (nb_record, result) in rdr.records().enumerate() {
        let record = result?;
        let (id, attr) = parse_node_record(&record, num_features, label_dim).map_err(|e| {
            log::error!("load_graph error at node record {} : {}", nb_record, e);
            anyhow!("node record {} : {}", nb_record, e)
        })?;
        if index.contains_key(&id) {
            log::error!("load_graph node id {} appears twice", id);
            return Err(anyhow!("node id {} appears twice", id));
        }
        index.insert(id, graph.add_node(attr));
    }
    log::info!("load_graph read {} nodes from {:?}", index.len(), nodes_path);
    //
    let file = open_file(edges_path)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .from_reader(BufReader::new(file));
    let mut nb_dropped = 0;
    for result in rdr.deserialize() {
        let edge: EdgeRecord = result?;
        let (a, b) = match (index.get(&edge.source), index.get(&edge.target)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => {
                log::error!("load_graph edge {:?} has unknown node", edge);
                return Err(anyhow!("edge ({},{}) refers to an unknown node", edge.source, edge.target));
            }
        };
        if a == b || graph.find_edge(a, b).is_some() {
            nb_dropped += 1;
            continue;
        }
        graph.add_edge(a, b, ());
    }
    log::info!(
        "load_graph read {} edges from {:?}, dropped {} self loops or duplicates",
        graph.edge_count(),
        edges_path,
        nb_dropped
    );
    Ok((graph, index))
} // end of load_graph

/// dumps graph in the format read by [load_graph], node ids being node indices
pub fn dump_graph(graph: &ContractedGraph, nodes_path: &Path, edges_path: &Path, delim: u8) -> Result<(), anyhow::Error> {
    log::debug!("entering dump_graph");
    let file = OpenOptions::new().write(true).create(true).truncate(true).open(nodes_path)?;
    let mut wtr = WriterBuilder::new().delimiter(delim).from_writer(BufWriter::new(file));
    let first = graph.node_indices().next();
    let nb_features = first.map_or(0, |n| graph[n].x.len());
    let nb_labels = first.map_or(0, |n| graph[n].y.len());
    let mut header = vec![String::from("id"), String::from("train")];
    header.extend((0..nb_features).map(|i| format!("x_{}", i)));
    header.extend((0..nb_labels).map(|i| format!("y_{}", i)));
    wtr.write_record(&header)?;
    for node in graph.node_indices() {
        let attr = &graph[node];
        let mut record = vec![node.index().to_string(), (attr.train as u8).to_string()];
        record.extend(attr.x.iter().chain(attr.y.iter()).map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    //
    let file = OpenOptions::new().write(true).create(true).truncate(true).open(edges_path)?;
    let mut wtr = WriterBuilder::new().delimiter(delim).from_writer(BufWriter::new(file));
    for edge in graph.edge_indices() {
        if let Some((a, b)) = graph.edge_endpoints(edge) {
            wtr.serialize(EdgeRecord { source: a.index() as u64, target: b.index() as u64 })?;
        }
    }
    wtr.flush()?;
    log::info!("dump_graph wrote {} nodes, {} edges", graph.node_count(), graph.edge_count());
    Ok(())
} // end of dump_graph
