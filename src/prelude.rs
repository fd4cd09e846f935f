//! To ease access to most frequently items
//!

pub use crate::attributes::{ContractGraph, ContractedGraph, NodeAttr};
pub use crate::params::{Constraint, ContractionParams};

pub use crate::centrality::{Centrality, CentralityMap, ScorerT};
pub use crate::partition::{partition_graph, Partition};

pub use crate::contraction::{contract_graph, ContractionState, Contractor, StepReport};

pub use crate::io::csv::{dump_graph, load_graph};
