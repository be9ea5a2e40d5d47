//! Shortest path search over undirected street graphs.

pub mod error;
pub mod export;
pub mod graph;
pub mod graph_impl;
pub mod interpolation;
pub mod queue;
pub mod route;
pub mod search_space;
pub mod spatial;
pub mod waypoint;

pub use error::PathError;

#[cfg(test)]
mod test_utils;
