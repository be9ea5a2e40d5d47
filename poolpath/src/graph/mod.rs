//! Weighted, undirected graph model.
//!
//! A [`Graph`] owns a vertex mapping (identifier to [`Vertex`]) and an
//! [`EdgeSource`]. The edge source is either an explicit mapping keyed by the
//! order independent [`EdgeKey`] or a function computing the edge of two
//! vertices on demand.
mod edge;
mod graph;
mod spatial;

pub use edge::*;
pub use graph::*;
pub use spatial::*;
