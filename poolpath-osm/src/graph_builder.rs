//! Routable street graph from OpenStreetMap ways.

use crate::osm::{OsmNode, OsmWay};
use poolpath::graph::{EdgeKey, Vertex, VertexId};
use poolpath::graph_impl::{OsmEdge, OsmGraph};
use poolpath::spatial::{haversine_distance, Coordinates};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

pub type Vertices = HashMap<VertexId, Vertex<Coordinates>>;
pub type Edges = HashMap<EdgeKey, OsmEdge>;

/// Counts collected while building a graph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
  /// Node records of the input.
  pub original_nodes: usize,
  pub ways: usize,
  /// Distinct node identifiers referenced by ways without a node record.
  pub missing_nodes: usize,
  /// Vertices without any neighbor.
  pub pruned: usize,
  /// Degree-2 vertices replaced by a direct edge.
  pub contracted: usize,
  pub contraction_passes: usize,
  pub vertices: usize,
  pub edges: usize,
}

/// Vertices and straight edges for every consecutive node pair of the ways.
/// Returns the number of missing node identifiers as well.
pub fn connect_ways(ways: &[OsmWay], nodes: &[OsmNode]) -> (Vertices, Edges, usize) {
  let mut vertices = Vertices::with_capacity(nodes.len());
  for node in nodes {
    vertices
      .entry(node.id)
      .or_insert_with(|| Vertex::new(Coordinates::new(node.lat, node.long)));
  }

  let mut edges = Edges::new();
  let mut missing = BTreeSet::new();
  for way in ways {
    for pair in way.nodes.windows(2) {
      let (a, b) = (pair[0], pair[1]);
      if a == b {
        continue;
      }
      let (position_a, position_b) = match (vertices.get(&a), vertices.get(&b)) {
        (Some(va), Some(vb)) => (va.data, vb.data),
        _ => {
          for id in [a, b] {
            if !vertices.contains_key(&id) && missing.insert(id) {
              warn!(node = id, way = way.id, "could not find node of way");
            }
          }
          continue;
        }
      };

      let weight = haversine_distance(&position_a, &position_b);
      edges
        .entry(EdgeKey::new(a, b))
        .and_modify(|edge| {
          if weight < edge.weight {
            *edge = OsmEdge::straight(weight);
          }
        })
        .or_insert_with(|| OsmEdge::straight(weight));

      for (from, to) in [(a, b), (b, a)] {
        if let Some(vertex) = vertices.get_mut(&from) {
          vertex.add_neighbor(to);
        }
      }
    }
  }

  (vertices, edges, missing.len())
}

/// Removes vertices without neighbors and returns how many were removed.
pub fn prune_isolated(vertices: &mut Vertices) -> usize {
  let before = vertices.len();
  vertices.retain(|_, vertex| vertex.degree() > 0);
  before - vertices.len()
}

// Geometry of an edge oriented from `from` towards the other endpoint
fn oriented(edge: &OsmEdge, from: VertexId, to: VertexId) -> impl Iterator<Item = &Coordinates> {
  let forward = from < to;
  let len = edge.geometry.len();
  (0..len).map(move |i| &edge.geometry[if forward { i } else { len - 1 - i }])
}

fn contract_vertex(vertices: &mut Vertices, edges: &mut Edges, id: VertexId) -> bool {
  let (position, lower, higher) = match vertices.get(&id) {
    Some(vertex) if vertex.degree() == 2 => {
      let (a, b) = (vertex.neighbors[0], vertex.neighbors[1]);
      (vertex.data, a.min(b), a.max(b))
    }
    _ => return false,
  };
  let (first, second) = match (
    edges.get(&EdgeKey::new(lower, id)),
    edges.get(&EdgeKey::new(id, higher)),
  ) {
    (Some(first), Some(second)) => (first, second),
    _ => {
      warn!(vertex = id, lower, higher, "degree-2 vertex without edges");
      return false;
    }
  };

  let mut geometry = Vec::with_capacity(first.geometry.len() + second.geometry.len() + 1);
  geometry.extend(oriented(first, lower, id));
  geometry.push(position);
  geometry.extend(oriented(second, id, higher));
  let merged = OsmEdge {
    weight: first.weight + second.weight,
    geometry,
  };

  edges.remove(&EdgeKey::new(lower, id));
  edges.remove(&EdgeKey::new(id, higher));
  let key = EdgeKey::new(lower, higher);
  let keep_existing = edges
    .get(&key)
    .map_or(false, |existing| existing.weight <= merged.weight);
  if !keep_existing {
    edges.insert(key, merged);
  }

  vertices.remove(&id);
  for (neighbor, other) in [(lower, higher), (higher, lower)] {
    if let Some(vertex) = vertices.get_mut(&neighbor) {
      vertex.remove_neighbor(id);
      vertex.add_neighbor(other);
    }
  }
  true
}

/// Replaces every vertex with exactly two neighbors by a single edge between
/// those neighbors until none is left. Vertices are visited in ascending
/// identifier order. Returns the number of contracted vertices and of passes
/// that contracted at least one vertex.
pub fn contract_degree_two(vertices: &mut Vertices, edges: &mut Edges) -> (usize, usize) {
  let mut contracted = 0;
  let mut passes = 0;
  loop {
    let mut ids: Vec<VertexId> = vertices
      .iter()
      .filter(|(_, vertex)| vertex.degree() == 2)
      .map(|(id, _)| *id)
      .collect();
    ids.sort_unstable();

    let in_pass = ids
      .into_iter()
      .filter(|id| contract_vertex(vertices, edges, *id))
      .count();
    if in_pass == 0 {
      break;
    }
    contracted += in_pass;
    passes += 1;
    debug!(pass = passes, contracted = in_pass, "contraction pass");
  }
  (contracted, passes)
}

/// Builds the routable graph of the given ways.
///
/// Every consecutive node pair of a way becomes an edge weighted with its
/// haversine length. Isolated vertices are dropped and chains of degree-2
/// vertices collapse into single edges that keep the chain's geometry.
pub fn build_graph(ways: &[OsmWay], nodes: &[OsmNode]) -> (OsmGraph, BuildSummary) {
  debug!(nodes = nodes.len(), ways = ways.len(), "building graph");

  let (mut vertices, mut edges, missing_nodes) = connect_ways(ways, nodes);
  let pruned = prune_isolated(&mut vertices);
  let (contracted, contraction_passes) = contract_degree_two(&mut vertices, &mut edges);

  let summary = BuildSummary {
    original_nodes: nodes.len(),
    ways: ways.len(),
    missing_nodes,
    pruned,
    contracted,
    contraction_passes,
    vertices: vertices.len(),
    edges: edges.len(),
  };
  info!(
    vertices = summary.vertices,
    original_nodes = summary.original_nodes,
    pruned,
    contracted,
    passes = contraction_passes,
    edges = summary.edges,
    "found {} vertices of original {} nodes",
    summary.vertices,
    summary.original_nodes
  );

  (OsmGraph::with_edge_map(vertices, edges), summary)
}
