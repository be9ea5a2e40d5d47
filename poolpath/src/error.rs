use crate::graph::VertexId;
use crate::queue::EmptyQueue;
use std::fmt;
use thiserror::Error;

/// Which lookup failed to resolve a vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexRole {
  Source,
  Target,
  Neighbor { of: VertexId },
}

impl fmt::Display for VertexRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VertexRole::Source => write!(f, "source"),
      VertexRole::Target => write!(f, "target"),
      VertexRole::Neighbor { of } => write!(f, "neighbor of {}", of),
    }
  }
}

/// Failures of a shortest path query.
///
/// A query that finds no path is not an error, see [`crate::route::shortest_path`].
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
  #[error("vertex {id} ({role}) was not found in graph")]
  VertexNotFound { id: VertexId, role: VertexRole },

  #[error("expected edge between vertex {from} and vertex {to}")]
  MissingEdge { from: VertexId, to: VertexId },

  #[error("predecessor {missing} of vertex {vertex} cannot be resolved")]
  Reconstruction { vertex: VertexId, missing: VertexId },

  #[error(transparent)]
  EmptyQueue(#[from] EmptyQueue),
}
