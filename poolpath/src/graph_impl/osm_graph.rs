use crate::graph::{Graph, HasGeometry, Weighted};
use crate::spatial::Coordinates;
use serde::{Deserialize, Serialize};

/// Edge of a street graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OsmEdge {
  /// Length in meters.
  pub weight: f64,
  /// Coordinates of the vertices that were contracted into this edge, sorted
  /// from the lower-identifier endpoint to the higher-identifier endpoint.
  pub geometry: Vec<Coordinates>,
}

impl OsmEdge {
  pub fn straight(weight: f64) -> Self {
    OsmEdge {
      weight,
      geometry: Vec::new(),
    }
  }
}

impl Weighted for OsmEdge {
  fn weight(&self) -> f64 {
    self.weight
  }
}

impl HasGeometry for OsmEdge {
  fn geometry(&self) -> &[Coordinates] {
    &self.geometry
  }
}

pub type OsmGraph = Graph<Coordinates, OsmEdge>;
