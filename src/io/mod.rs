//! io utilities

/// load and dump of node attributed graphs as csv files
pub mod csv;
