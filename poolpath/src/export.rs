//! JSON shapes for graph topology and routes.

use crate::graph::*;
use crate::spatial::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexJson {
  pub id: VertexId,
  pub lat: f64,
  pub long: f64,
}

impl VertexJson {
  pub fn new(id: VertexId, position: Coordinates) -> Self {
    VertexJson {
      id,
      lat: position.lat,
      long: position.long,
    }
  }
}

/// Edge with its full polyline, from the lower-identifier endpoint to the
/// higher-identifier endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeJson {
  pub id: EdgeKey,
  pub geometry: Vec<Coordinates>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphJson {
  pub vertices: Vec<VertexJson>,
  pub edges: Vec<EdgeJson>,
}

impl GraphJson {
  /// Vertices sorted by identifier and edges sorted by key. Adjacency entries
  /// without an edge or without both endpoints are left out.
  pub fn from_graph<D: HasPosition, E: HasGeometry + Clone>(graph: &Graph<D, E>) -> Self {
    let mut vertices: Vec<VertexJson> = graph
      .vertices()
      .map(|(id, vertex)| VertexJson::new(id, vertex.data.position()))
      .collect();
    vertices.sort_by_key(|v| v.id);

    let keys: BTreeSet<EdgeKey> = graph
      .vertices()
      .flat_map(|(id, vertex)| vertex.neighbors.iter().map(move |n| EdgeKey::new(id, *n)))
      .filter(|key| key.lower() != key.higher())
      .collect();

    let edges = keys
      .into_iter()
      .filter_map(|key| {
        let lower = graph.vertex(key.lower())?;
        let higher = graph.vertex(key.higher())?;
        let edge = graph.edge_between(key.lower(), key.higher())?;

        let mut geometry = Vec::with_capacity(edge.geometry().len() + 2);
        geometry.push(lower.data.position());
        geometry.extend(edge.geometry().iter());
        geometry.push(higher.data.position());
        Some(EdgeJson { id: key, geometry })
      })
      .collect();

    GraphJson { vertices, edges }
  }
}

/// A computed route between two vertices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteJson {
  pub source: VertexJson,
  pub target: VertexJson,
  pub path: Vec<Coordinates>,
}
