//! Geographic types.

use geo::{Coord, HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// WGS84 position in decimal degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub lat: f64,
  pub long: f64,
}

impl Coordinates {
  pub fn new(lat: f64, long: f64) -> Self {
    Coordinates { lat, long }
  }

  /// Position on the unit sphere. The chord between two such vectors grows
  /// monotonically with the great-circle distance of the positions.
  pub fn to_unit_vector(&self) -> [f64; 3] {
    let (lat, long) = (self.lat.to_radians(), self.long.to_radians());
    [lat.cos() * long.cos(), lat.cos() * long.sin(), lat.sin()]
  }
}

impl From<Coordinates> for Point<f64> {
  fn from(c: Coordinates) -> Self {
    Point::new(c.long, c.lat)
  }
}

impl From<Coordinates> for Coord<f64> {
  fn from(c: Coordinates) -> Self {
    Coord { x: c.long, y: c.lat }
  }
}

impl From<Coord<f64>> for Coordinates {
  fn from(c: Coord<f64>) -> Self {
    Coordinates { lat: c.y, long: c.x }
  }
}

/// Great-circle distance in meters.
pub fn haversine_distance(from: &Coordinates, to: &Coordinates) -> f64 {
  Point::from(*from).haversine_distance(&Point::from(*to))
}

/// Sum of the haversine distances between consecutive points.
pub fn path_length(points: &[Coordinates]) -> f64 {
  points
    .windows(2)
    .map(|pair| haversine_distance(&pair[0], &pair[1]))
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_haversine_distance() {
    let berlin = Coordinates::new(52.5200, 13.4050);
    let potsdam = Coordinates::new(52.3906, 13.0645);

    let distance = haversine_distance(&berlin, &potsdam);
    assert!((distance - 26_900.0).abs() < 500.0, "distance = {}", distance);
    assert_eq!(distance, haversine_distance(&potsdam, &berlin));
    assert_eq!(haversine_distance(&berlin, &berlin), 0.0);
  }

  #[test]
  fn test_unit_vector_is_normalized() {
    for c in [
      Coordinates::new(0.0, 0.0),
      Coordinates::new(48.77, 9.18),
      Coordinates::new(-33.86, 151.21),
    ] {
      let [x, y, z] = c.to_unit_vector();
      assert!(((x * x + y * y + z * z) - 1.0).abs() < 1e-12);
    }
  }

  #[test]
  fn test_path_length() {
    let a = Coordinates::new(48.7758, 9.1829);
    let b = Coordinates::new(48.7760, 9.1840);
    let c = Coordinates::new(48.7770, 9.1850);

    assert_eq!(path_length(&[]), 0.0);
    assert_eq!(path_length(&[a]), 0.0);
    let expected = haversine_distance(&a, &b) + haversine_distance(&b, &c);
    assert!((path_length(&[a, b, c]) - expected).abs() < 1e-9);
  }
}
