use geo::Coord;
use poolpath::export::{RouteJson, VertexJson};
use poolpath::graph::VertexId;
use poolpath::route::{RouteResult, Router};
use poolpath::spatial::Coordinates;
use polyline::encode_coordinates;
use serde::{Deserialize, Serialize};
use tracing::warn;

const POLYLINE_PRECISION: u32 = 5;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexPairRequest {
  pub source_id: VertexId,
  pub target_id: VertexId,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CoordinatesRequest {
  pub source: Coordinates,
  pub target: Coordinates,
}

/// Answer of both shortest path endpoints. Exactly one of `route` and `error`
/// is set.
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ShortestPathResponse {
  pub route: Option<RouteJson>,
  pub cost: Option<f64>,
  /// Route geometry as encoded polyline
  pub polyline: Option<String>,
  pub error: Option<String>,
}

impl ShortestPathResponse {
  pub fn from_route(router: &Router, result: &RouteResult) -> Self {
    let endpoint = |id: VertexId| {
      router
        .graph()
        .vertex(id)
        .map(|vertex| VertexJson::new(id, vertex.data))
    };
    let (source, target) = match (endpoint(result.source), endpoint(result.target)) {
      (Some(source), Some(target)) => (source, target),
      _ => return Self::failed("route endpoints are not part of the graph"),
    };

    let polyline = match encode_coordinates(
      result.geometry.iter().map(|c| Coord::from(*c)),
      POLYLINE_PRECISION,
    ) {
      Ok(polyline) => Some(polyline),
      Err(err) => {
        warn!(
          source = result.source,
          target = result.target,
          %err,
          "cannot encode route geometry as polyline"
        );
        None
      }
    };

    ShortestPathResponse {
      route: Some(RouteJson {
        source,
        target,
        path: result.geometry.clone(),
      }),
      cost: Some(result.path.cost),
      polyline,
      error: None,
    }
  }

  pub fn failed(message: impl Into<String>) -> Self {
    ShortestPathResponse {
      error: Some(message.into()),
      ..Default::default()
    }
  }
}
