//! Route finding algorithms.

use crate::error::{PathError, VertexRole};
use crate::graph::*;
use crate::graph_impl::OsmGraph;
use crate::search_space::*;
use crate::spatial::*;
use crate::waypoint::*;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Vertices of a shortest path from source to target and their summed edge weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
  pub vertices: Vec<VertexId>,
  pub cost: f64,
}

impl Path {
  /// Consecutive vertex pairs, one per traversed edge.
  pub fn legs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
    self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
  }
}

fn resolve<D, E>(
  graph: &Graph<D, E>,
  id: VertexId,
  role: VertexRole,
) -> Result<VertexRef<'_, D>, PathError> {
  match graph.vertex(id) {
    Some(vertex) => Ok((id, &vertex.data)),
    None => {
      warn!(id, %role, "vertex was not found in graph");
      Err(PathError::VertexNotFound { id, role })
    }
  }
}

/// Finds the cheapest path between two vertices.
///
/// Without a heuristic this is Dijkstra's algorithm, with one it is A*. Returns
/// `Ok(None)` when the target cannot be reached from the source.
///
/// The heuristic must never overestimate the remaining cost for the result to be
/// optimal. Closed vertices are never reopened, so an overestimating heuristic
/// can produce a longer path than necessary.
///
/// Source and target must exist in the graph. `options.ignore_missing_ids` only
/// affects neighbor identifiers met during the search.
pub fn shortest_path<D, E: Weighted + Clone>(
  graph: &Graph<D, E>,
  source: VertexId,
  target: VertexId,
  heuristic: Option<Heuristic<'_, D>>,
  options: &ShortestPathOptions,
) -> Result<Option<Path>, PathError> {
  let started = Instant::now();
  let source_ref = resolve(graph, source, VertexRole::Source)?;
  let target_ref = resolve(graph, target, VertexRole::Target)?;

  let mut search_space = SearchSpace::new();
  search_space.init(source, heuristic.map_or(0.0, |h| h(source_ref, target_ref)));

  loop {
    match search_space.step(graph, target_ref, heuristic, options)? {
      Progress::Expanded(_) => {}
      Progress::Found(id) => {
        let vertices = search_space.reconstruct(graph, id)?;
        let cost = search_space.distance(id).unwrap_or(f64::INFINITY);
        debug!(
          source,
          target,
          cost,
          closed = search_space.number_of_closed(),
          elapsed = ?started.elapsed(),
          "path found"
        );
        return Ok(Some(Path { vertices, cost }));
      }
      Progress::Exhausted => {
        debug!(
          source,
          target,
          closed = search_space.number_of_closed(),
          elapsed = ?started.elapsed(),
          "no path"
        );
        return Ok(None);
      }
    }
  }
}

pub fn dijkstra<D, E: Weighted + Clone>(
  graph: &Graph<D, E>,
  source: VertexId,
  target: VertexId,
) -> Result<Option<Path>, PathError> {
  shortest_path(graph, source, target, None, &ShortestPathOptions::default())
}

pub fn a_star<D, E: Weighted + Clone>(
  graph: &Graph<D, E>,
  source: VertexId,
  target: VertexId,
  heuristic: Heuristic<'_, D>,
) -> Result<Option<Path>, PathError> {
  shortest_path(
    graph,
    source,
    target,
    Some(heuristic),
    &ShortestPathOptions::default(),
  )
}

/// Straight line distance between two positioned vertices, in meters.
pub fn haversine_heuristic<D: HasPosition>(vertex: VertexRef<'_, D>, target: VertexRef<'_, D>) -> f64 {
  haversine_distance(&vertex.1.position(), &target.1.position())
}

/// Coordinates along a path: every vertex position with the geometry of the
/// traversed edges in between, oriented in travel direction.
pub fn collect_route_geometry<D: HasPosition, E: HasGeometry + Clone>(
  graph: &Graph<D, E>,
  path: &Path,
) -> Result<Vec<Coordinates>, PathError> {
  let mut result = Vec::new();
  let mut previous: Option<VertexId> = None;

  for &id in &path.vertices {
    let vertex = graph.vertex(id).ok_or(PathError::VertexNotFound {
      id,
      role: match previous {
        Some(of) => VertexRole::Neighbor { of },
        None => VertexRole::Source,
      },
    })?;

    if let Some(from) = previous {
      let edge = graph
        .edge_between(from, id)
        .ok_or(PathError::MissingEdge { from, to: id })?;
      // Edge geometry runs from the lower to the higher identifier
      if from < id {
        result.extend(edge.geometry().iter());
      } else {
        result.extend(edge.geometry().iter().rev());
      }
    }

    result.push(vertex.data.position());
    previous = Some(id);
  }

  Ok(result)
}

/// Routes between the vertices closest to two positions and returns the
/// coordinates of the route. `Ok(None)` if the graph is empty or the vertices are
/// not connected.
pub fn shortest_path_by_coordinates<D: HasPosition, E: Weighted + HasGeometry + Clone>(
  graph: &Graph<D, E>,
  from: &Coordinates,
  to: &Coordinates,
) -> Result<Option<Vec<Coordinates>>, PathError> {
  let (source, target) = match (closest_vertex(graph, from), closest_vertex(graph, to)) {
    (Some(source), Some(target)) => (source.0, target.0),
    _ => return Ok(None),
  };

  match a_star(graph, source, target, &haversine_heuristic::<D>)? {
    Some(path) => collect_route_geometry(graph, &path).map(Some),
    None => Ok(None),
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
  pub source: VertexId,
  pub target: VertexId,
  pub path: Path,
  pub geometry: Vec<Coordinates>,
}

/// Shared, immutable street graph together with its vertex index. Cloning is
/// cheap, every clone refers to the same snapshot.
#[derive(Clone, Debug)]
pub struct Router {
  graph: Arc<OsmGraph>,
  index: Arc<VertexIndex>,
}

impl Router {
  pub fn new(graph: Arc<OsmGraph>) -> Self {
    let index = Arc::new(VertexIndex::new(&graph));
    Router { graph, index }
  }

  pub fn graph(&self) -> &OsmGraph {
    &self.graph
  }

  pub fn closest_vertex(&self, coordinates: &Coordinates) -> Option<VertexId> {
    self.index.closest(coordinates)
  }

  pub fn route(
    &self,
    from: &Coordinates,
    to: &Coordinates,
  ) -> Result<Option<RouteResult>, PathError> {
    match (self.closest_vertex(from), self.closest_vertex(to)) {
      (Some(source), Some(target)) => self.route_between_vertices(source, target),
      _ => Ok(None),
    }
  }

  pub fn route_between_vertices(
    &self,
    source: VertexId,
    target: VertexId,
  ) -> Result<Option<RouteResult>, PathError> {
    let path = match a_star(self.graph(), source, target, &haversine_heuristic::<Coordinates>)? {
      Some(path) => path,
      None => return Ok(None),
    };
    let geometry = collect_route_geometry(self.graph(), &path)?;
    Ok(Some(RouteResult {
      source,
      target,
      path,
      geometry,
    }))
  }
}
