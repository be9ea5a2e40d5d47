//! Graph data structures.
//!
//! [`OsmGraph`] is the routable street graph: vertices are located at
//! [`Coordinates`](crate::spatial::Coordinates) and every edge keeps the
//! geometry of the road it replaces.

mod osm_graph;

pub use osm_graph::*;
