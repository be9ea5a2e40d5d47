//! Waypoint matching.

use crate::graph::*;
use crate::spatial::*;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use std::fmt;

/// Vertex closest to `coordinates` by haversine distance, found by scanning all
/// vertices. Ties go to the lower identifier. `None` only for an empty graph.
pub fn closest_vertex<'g, D: HasPosition, E>(
  graph: &'g Graph<D, E>,
  coordinates: &Coordinates,
) -> Option<VertexRef<'g, D>> {
  graph
    .vertices()
    .map(|(id, vertex)| {
      let distance = haversine_distance(&vertex.data.position(), coordinates);
      (distance, id, &vertex.data)
    })
    .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
    .map(|(_, id, data)| (id, data))
}

#[derive(Debug)]
struct Entry {
  id: VertexId,
  point: [f64; 3],
}

impl RTreeObject for Entry {
  type Envelope = AABB<[f64; 3]>;
  fn envelope(&self) -> Self::Envelope {
    AABB::from_point(self.point)
  }
}

impl PointDistance for Entry {
  fn distance_2(&self, point: &[f64; 3]) -> f64 {
    self.point.distance_2(point)
  }
}

/// R-tree over the vertex positions of a graph.
///
/// Positions are indexed as vectors on the unit sphere, so the nearest entry
/// by chord length is also the nearest vertex by great-circle distance.
pub struct VertexIndex {
  rtree: RTree<Entry>,
}

impl fmt::Debug for VertexIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("VertexIndex").field("len", &self.len()).finish()
  }
}

impl VertexIndex {
  pub fn new<D: HasPosition, E>(graph: &Graph<D, E>) -> Self {
    let entries = graph
      .vertices()
      .map(|(id, vertex)| Entry {
        id,
        point: vertex.data.position().to_unit_vector(),
      })
      .collect();
    Self {
      rtree: RTree::bulk_load(entries),
    }
  }

  pub fn len(&self) -> usize {
    self.rtree.size()
  }

  pub fn is_empty(&self) -> bool {
    self.rtree.size() == 0
  }

  /// Identifier of the vertex closest to `coordinates`, ties go to the lower identifier.
  pub fn closest(&self, coordinates: &Coordinates) -> Option<VertexId> {
    let query = coordinates.to_unit_vector();
    let mut nearest = self.rtree.nearest_neighbor_iter_with_distance_2(&query);
    let (first, min_distance) = nearest.next()?;
    Some(
      nearest
        .take_while(|(_, distance)| *distance <= min_distance)
        .map(|(entry, _)| entry.id)
        .fold(first.id, VertexId::min),
    )
  }
}
