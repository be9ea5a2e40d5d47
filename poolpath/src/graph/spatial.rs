use crate::spatial::Coordinates;

/// Vertex data located at a geographic position.
pub trait HasPosition {
  fn position(&self) -> Coordinates;
}

impl HasPosition for Coordinates {
  fn position(&self) -> Coordinates {
    *self
  }
}

/// Edge data carrying the intermediate coordinates between its two endpoints.
///
/// The coordinates are ordered from the lower-identifier endpoint to the
/// higher-identifier endpoint and exclude both endpoints.
pub trait HasGeometry {
  fn geometry(&self) -> &[Coordinates];
}

/// Plain weights are straight connections without intermediate coordinates.
impl HasGeometry for f64 {
  fn geometry(&self) -> &[Coordinates] {
    &[]
  }
}
