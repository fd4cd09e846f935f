//! lib target
//!
//! Contraction of node attributed training graphs: nodes are partitioned by k-means on their features and labels,
//! then training nodes of low centrality are merged into their most central neighbour until the training node budgets
//! of a schedule are reached, while keeping the repartition of training nodes among clusters.

pub mod attributes;

pub mod params;

pub mod centrality;

pub mod partition;

pub mod contraction;

pub mod io;

pub mod prelude;
