use super::VertexId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order independent identifier of the edge between two vertices.
///
/// The lower identifier always comes first, so `EdgeKey::new(a, b)` and
/// `EdgeKey::new(b, a)` are equal. Every edge lookup goes through this key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
  pub fn new(a: VertexId, b: VertexId) -> Self {
    if a <= b {
      EdgeKey(a, b)
    } else {
      EdgeKey(b, a)
    }
  }

  pub fn lower(&self) -> VertexId {
    self.0
  }

  pub fn higher(&self) -> VertexId {
    self.1
  }

  pub fn contains(&self, id: VertexId) -> bool {
    self.0 == id || self.1 == id
  }
}

impl fmt::Display for EdgeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.0, self.1)
  }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid edge key '{0}'")]
pub struct ParseEdgeKeyError(String);

impl FromStr for EdgeKey {
  type Err = ParseEdgeKeyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (a, b) = s.split_once(':').ok_or_else(|| ParseEdgeKeyError(s.to_string()))?;
    match (a.parse(), b.parse()) {
      (Ok(a), Ok(b)) => Ok(EdgeKey::new(a, b)),
      _ => Err(ParseEdgeKeyError(s.to_string())),
    }
  }
}

impl Serialize for EdgeKey {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for EdgeKey {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
  }
}

/// Edge with a non-negative traversal cost.
pub trait Weighted {
  fn weight(&self) -> f64;
}

impl Weighted for f64 {
  fn weight(&self) -> f64 {
    *self
  }
}
