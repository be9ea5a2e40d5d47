use crate::graph::*;
use crate::graph_impl::{OsmEdge, OsmGraph};
use crate::spatial::*;

use std::collections::HashMap;

pub fn graph_from_edges(edges: &[(VertexId, VertexId, f64)]) -> Graph<(), f64> {
  let mut vertices: HashMap<VertexId, Vertex<()>> = HashMap::new();
  let mut edge_map = HashMap::new();

  for &(a, b, weight) in edges {
    vertices.entry(a).or_insert_with(|| Vertex::new(())).add_neighbor(b);
    vertices.entry(b).or_insert_with(|| Vertex::new(())).add_neighbor(a);
    edge_map.insert(EdgeKey::new(a, b), weight);
  }

  Graph::with_edge_map(vertices, edge_map)
}

/// Builds an OSM graph. Each edge lists its intermediate coordinates in the
/// direction `from -> to`; the weight is the length of the full polyline.
pub fn osm_graph_from(
  positions: &[(VertexId, Coordinates)],
  edges: &[(VertexId, VertexId, Vec<Coordinates>)],
) -> OsmGraph {
  let mut vertices: HashMap<VertexId, Vertex<Coordinates>> = positions
    .iter()
    .map(|(id, position)| (*id, Vertex::new(*position)))
    .collect();
  let mut edge_map = HashMap::new();

  for (from, to, intermediate) in edges {
    let mut polyline = vec![vertices[from].data];
    polyline.extend(intermediate.iter().cloned());
    polyline.push(vertices[to].data);

    let mut geometry = intermediate.clone();
    if from > to {
      geometry.reverse();
    }
    edge_map.insert(
      EdgeKey::new(*from, *to),
      OsmEdge {
        weight: path_length(&polyline),
        geometry,
      },
    );
    vertices.get_mut(from).unwrap().add_neighbor(*to);
    vertices.get_mut(to).unwrap().add_neighbor(*from);
  }

  Graph::with_edge_map(vertices, edge_map)
}
