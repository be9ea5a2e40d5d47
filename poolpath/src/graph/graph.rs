use super::{EdgeKey, Weighted};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Vertex identifier, unique within one graph.
pub type VertexId = i64;

/// A vertex identifier together with the vertex data.
pub type VertexRef<'a, D> = (VertexId, &'a D);

/// Computes the edge between two vertices, `None` when they are not connected.
pub type EdgeFn<D, E> =
  Box<dyn Fn(VertexRef<'_, D>, VertexRef<'_, D>) -> Option<E> + Send + Sync>;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex<D> {
  pub data: D,
  /// Adjacency list. Every identifier must resolve to a vertex of the same graph.
  pub neighbors: Vec<VertexId>,
}

impl<D> Vertex<D> {
  pub fn new(data: D) -> Self {
    Vertex {
      data,
      neighbors: Vec::new(),
    }
  }

  pub fn with_neighbors(data: D, neighbors: Vec<VertexId>) -> Self {
    Vertex { data, neighbors }
  }

  pub fn degree(&self) -> usize {
    self.neighbors.len()
  }

  /// Returns false if `id` already was a neighbor.
  pub fn add_neighbor(&mut self, id: VertexId) -> bool {
    if self.neighbors.contains(&id) {
      return false;
    }
    self.neighbors.push(id);
    true
  }

  pub fn remove_neighbor(&mut self, id: VertexId) {
    self.neighbors.retain(|n| *n != id);
  }
}

/// Where the edges of a graph come from.
pub enum EdgeSource<D, E> {
  Map(HashMap<EdgeKey, E>),
  Function(EdgeFn<D, E>),
}

impl<D, E: fmt::Debug> fmt::Debug for EdgeSource<D, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EdgeSource::Map(map) => f.debug_tuple("Map").field(map).finish(),
      EdgeSource::Function(_) => f.write_str("Function(..)"),
    }
  }
}

/// Undirected graph which exclusively owns its vertices and edges.
///
/// Searches only read the graph; it is safe to share a built graph between
/// threads, e.g. behind an `Arc`.
#[derive(Debug)]
pub struct Graph<D, E> {
  vertices: HashMap<VertexId, Vertex<D>>,
  edges: EdgeSource<D, E>,
}

impl<D, E> Default for Graph<D, E> {
  fn default() -> Self {
    Graph {
      vertices: HashMap::new(),
      edges: EdgeSource::Map(HashMap::new()),
    }
  }
}

impl<D, E> Graph<D, E> {
  pub fn new(vertices: HashMap<VertexId, Vertex<D>>, edges: EdgeSource<D, E>) -> Self {
    Graph { vertices, edges }
  }

  pub fn with_edge_map(
    vertices: HashMap<VertexId, Vertex<D>>,
    edges: HashMap<EdgeKey, E>,
  ) -> Self {
    Graph::new(vertices, EdgeSource::Map(edges))
  }

  pub fn with_edge_fn<F>(vertices: HashMap<VertexId, Vertex<D>>, edge_fn: F) -> Self
  where
    F: Fn(VertexRef<'_, D>, VertexRef<'_, D>) -> Option<E> + Send + Sync + 'static,
  {
    Graph::new(vertices, EdgeSource::Function(Box::new(edge_fn)))
  }

  pub fn vertex(&self, id: VertexId) -> Option<&Vertex<D>> {
    self.vertices.get(&id)
  }

  pub fn contains_vertex(&self, id: VertexId) -> bool {
    self.vertices.contains_key(&id)
  }

  pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex<D>)> {
    self.vertices.iter().map(|(id, vertex)| (*id, vertex))
  }

  pub fn number_of_vertices(&self) -> usize {
    self.vertices.len()
  }

  /// Number of stored edges. For function backed graphs the adjacency lists are
  /// counted instead.
  pub fn number_of_edges(&self) -> usize {
    match &self.edges {
      EdgeSource::Map(map) => map.len(),
      EdgeSource::Function(_) => {
        self.vertices.values().map(Vertex::degree).sum::<usize>() / 2
      }
    }
  }

  pub fn edge_source(&self) -> &EdgeSource<D, E> {
    &self.edges
  }

  pub fn edge_map(&self) -> Option<&HashMap<EdgeKey, E>> {
    match &self.edges {
      EdgeSource::Map(map) => Some(map),
      EdgeSource::Function(_) => None,
    }
  }

  pub fn into_parts(self) -> (HashMap<VertexId, Vertex<D>>, EdgeSource<D, E>) {
    (self.vertices, self.edges)
  }
}

impl<D, E: Clone> Graph<D, E> {
  /// Edge between two resolved vertices.
  pub fn edge(&self, a: VertexRef<'_, D>, b: VertexRef<'_, D>) -> Option<Cow<'_, E>> {
    match &self.edges {
      EdgeSource::Map(map) => map.get(&EdgeKey::new(a.0, b.0)).map(Cow::Borrowed),
      EdgeSource::Function(edge_fn) => edge_fn(a, b).map(Cow::Owned),
    }
  }

  /// Edge between two vertex identifiers. `None` if either vertex is unknown.
  pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<Cow<'_, E>> {
    let vertex_a = self.vertex(a)?;
    let vertex_b = self.vertex(b)?;
    self.edge((a, &vertex_a.data), (b, &vertex_b.data))
  }
}

impl<D, E: Weighted + Clone> Graph<D, E> {
  pub fn weight(&self, a: VertexRef<'_, D>, b: VertexRef<'_, D>) -> Option<f64> {
    self.edge(a, b).map(|edge| edge.weight())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::graph_from_edges;

  #[test]
  fn test_vertex_neighbors() {
    let mut vertex = Vertex::new(());
    assert!(vertex.add_neighbor(2));
    assert!(vertex.add_neighbor(3));
    assert!(!vertex.add_neighbor(2));
    assert_eq!(vertex.degree(), 2);

    vertex.remove_neighbor(2);
    assert_eq!(vertex.neighbors, vec![3]);
  }

  #[test]
  fn test_edge_map_lookup_is_direction_independent() {
    let graph = graph_from_edges(&[(1, 2, 4.0), (2, 3, 1.5)]);

    assert_eq!(graph.number_of_vertices(), 3);
    assert_eq!(graph.number_of_edges(), 2);
    assert_eq!(graph.edge_between(1, 2).as_deref(), Some(&4.0));
    assert_eq!(graph.edge_between(2, 1).as_deref(), Some(&4.0));
    assert_eq!(graph.edge_between(1, 3), None);
    assert_eq!(graph.edge_between(1, 99), None);

    let two = graph.vertex(2).unwrap();
    let three = graph.vertex(3).unwrap();
    assert_eq!(graph.weight((3, &three.data), (2, &two.data)), Some(1.5));
  }

  #[test]
  fn test_edge_function_lookup() {
    let mut vertices = HashMap::new();
    vertices.insert(1, Vertex::with_neighbors(10.0, vec![2]));
    vertices.insert(2, Vertex::with_neighbors(13.0, vec![1, 3]));
    vertices.insert(3, Vertex::with_neighbors(20.0, vec![2]));

    let graph: Graph<f64, f64> = Graph::with_edge_fn(vertices, |(a, da), (b, db)| {
      if (a - b).abs() == 1 {
        Some((da - db).abs())
      } else {
        None
      }
    });

    assert!(graph.edge_map().is_none());
    assert_eq!(graph.number_of_edges(), 2);
    assert_eq!(graph.edge_between(3, 2).as_deref(), Some(&7.0));
    assert_eq!(graph.edge_between(1, 3), None);
    assert_eq!(format!("{:?}", graph.edge_source()), "Function(..)");
  }
}
