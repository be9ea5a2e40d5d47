//! Travel times and positions along coordinate paths.

use crate::spatial::*;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SPEED_KMH: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum TimelineError {
  #[error("a coordinate path needs at least 2 coordinates, got {0}")]
  TooShort(usize),

  #[error("speed must be positive and finite, got {0} km/h")]
  InvalidSpeed(f64),
}

/// Time to cover `distance` meters at `speed_kmh`.
pub fn travel_time(distance: f64, speed_kmh: f64) -> Result<Duration, TimelineError> {
  if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
    return Err(TimelineError::InvalidSpeed(speed_kmh));
  }
  Duration::try_from_secs_f64(distance.max(0.0) / 1000.0 / speed_kmh * 3600.0)
    .map_err(|_| TimelineError::InvalidSpeed(speed_kmh))
}

/// A path coordinate with the distance and travel time from the previous one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimedCoordinates {
  pub position: Coordinates,
  pub distance: f64,
  pub travel_time: Duration,
}

/// Annotates every coordinate with distance and travel time from its
/// predecessor. The first coordinate gets zero for both.
pub fn with_travel_times(
  path: &[Coordinates],
  speed_kmh: f64,
) -> Result<Vec<TimedCoordinates>, TimelineError> {
  path
    .iter()
    .enumerate()
    .map(|(index, position)| {
      let previous = &path[index.saturating_sub(1)];
      let distance = haversine_distance(previous, position);
      Ok(TimedCoordinates {
        position: *position,
        distance,
        travel_time: travel_time(distance, speed_kmh)?,
      })
    })
    .collect()
}

/// Movement along a coordinate path at constant speed.
#[derive(Clone, Debug)]
pub struct RouteTimeline {
  points: Vec<TimedCoordinates>,
  total: Duration,
}

impl RouteTimeline {
  pub fn new(path: &[Coordinates], speed_kmh: f64) -> Result<Self, TimelineError> {
    if path.len() < 2 {
      return Err(TimelineError::TooShort(path.len()));
    }
    let points = with_travel_times(path, speed_kmh)?;
    let total = points.iter().map(|p| p.travel_time).sum();
    Ok(RouteTimeline { points, total })
  }

  pub fn total(&self) -> Duration {
    self.total
  }

  pub fn points(&self) -> &[TimedCoordinates] {
    &self.points
  }

  /// Position after travelling for `elapsed`, linearly interpolated between the
  /// two surrounding coordinates. Stays at the last coordinate once the path is
  /// completed.
  pub fn position_at(&self, elapsed: Duration) -> Coordinates {
    let mut segment_start = Duration::ZERO;
    for pair in self.points.windows(2) {
      let (start, end) = (&pair[0], &pair[1]);
      if segment_start + end.travel_time >= elapsed {
        let factor = if end.travel_time.is_zero() {
          0.0
        } else {
          elapsed.saturating_sub(segment_start).as_secs_f64() / end.travel_time.as_secs_f64()
        };
        return Coordinates::new(
          start.position.lat + (end.position.lat - start.position.lat) * factor,
          start.position.long + (end.position.long - start.position.long) * factor,
        );
      }
      segment_start += end.travel_time;
    }
    self
      .points
      .last()
      .map(|p| p.position)
      .unwrap_or_default()
  }
}
