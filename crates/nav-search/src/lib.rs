//! Generic best-first search over parametrized graph contracts.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod graph;

pub use astar::AStar;
pub use graph::SearchGraph;
