use crate::error::{PathError, VertexRole};
use crate::graph::*;
use crate::queue::PriorityQueue;
use std::collections::{HashMap, HashSet};

/// Estimated remaining cost from a vertex (first argument) to the target
/// (second argument).
pub type Heuristic<'h, D> = &'h dyn Fn(VertexRef<'_, D>, VertexRef<'_, D>) -> f64;

/// What happens to an outdated queue entry of a vertex whose distance improved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StaleEntries {
  /// Leave it in the queue and drop it when it is dequeued after the vertex was closed.
  #[default]
  Skip,
  /// Remove every open entry of the vertex before enqueueing it again.
  Remove,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortestPathOptions {
  /// Skip neighbor identifiers that do not resolve to a vertex instead of failing.
  pub ignore_missing_ids: bool,
  pub stale_entries: StaleEntries,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Progress {
  /// The vertex was closed and its neighbors relaxed.
  Expanded(VertexId),
  /// The target was dequeued, its distance is final.
  Found(VertexId),
  /// The queue ran empty without reaching the target.
  Exhausted,
}

/// Per-query search state.
///
/// Tentative distances, predecessors and the closed set live here and never on
/// the graph, so any number of searches can run over one shared graph.
pub struct SearchSpace {
  queue: PriorityQueue<VertexId>,
  distances: HashMap<VertexId, f64>,
  predecessors: HashMap<VertexId, VertexId>,
  closed: HashSet<VertexId>,
}

impl Default for SearchSpace {
  fn default() -> Self {
    Self::new()
  }
}

impl SearchSpace {
  pub fn new() -> Self {
    SearchSpace {
      queue: PriorityQueue::new(),
      distances: HashMap::new(),
      predecessors: HashMap::new(),
      closed: HashSet::new(),
    }
  }

  /// Resets the state and opens `source` with distance zero.
  pub fn init(&mut self, source: VertexId, priority: f64) {
    self.queue.clear();
    self.distances.clear();
    self.predecessors.clear();
    self.closed.clear();

    self.distances.insert(source, 0.0);
    self.queue.enqueue(source, priority);
  }

  pub fn distance(&self, node: VertexId) -> Option<f64> {
    self.distances.get(&node).copied()
  }

  pub fn predecessor(&self, node: VertexId) -> Option<VertexId> {
    self.predecessors.get(&node).copied()
  }

  pub fn is_closed(&self, node: VertexId) -> bool {
    self.closed.contains(&node)
  }

  pub fn number_of_closed(&self) -> usize {
    self.closed.len()
  }

  pub fn queue_len(&self) -> usize {
    self.queue.len()
  }

  /// Dequeues the open vertex with the lowest priority and relaxes its neighbors.
  pub fn step<D, E: Weighted + Clone>(
    &mut self,
    graph: &Graph<D, E>,
    target: VertexRef<'_, D>,
    heuristic: Option<Heuristic<'_, D>>,
    options: &ShortestPathOptions,
  ) -> Result<Progress, PathError> {
    let current_id = loop {
      if self.queue.is_empty() {
        return Ok(Progress::Exhausted);
      }
      let id = self.queue.dequeue()?;
      if !self.closed.contains(&id) {
        break id;
      }
    };

    if current_id == target.0 {
      return Ok(Progress::Found(current_id));
    }

    let current = graph.vertex(current_id).ok_or(PathError::VertexNotFound {
      id: current_id,
      role: match self.predecessor(current_id) {
        Some(of) => VertexRole::Neighbor { of },
        None => VertexRole::Source,
      },
    })?;
    let current_distance = self.distance(current_id).unwrap_or(f64::INFINITY);

    for &neighbor_id in &current.neighbors {
      if neighbor_id == current_id || self.closed.contains(&neighbor_id) {
        continue;
      }

      let neighbor = match graph.vertex(neighbor_id) {
        Some(neighbor) => neighbor,
        None if options.ignore_missing_ids => continue,
        None => {
          return Err(PathError::VertexNotFound {
            id: neighbor_id,
            role: VertexRole::Neighbor { of: current_id },
          })
        }
      };

      let weight = graph
        .weight((current_id, &current.data), (neighbor_id, &neighbor.data))
        .ok_or(PathError::MissingEdge {
          from: current_id,
          to: neighbor_id,
        })?;

      let path_cost = current_distance + weight;
      let improved = path_cost < self.distance(neighbor_id).unwrap_or(f64::INFINITY);
      if improved {
        self.distances.insert(neighbor_id, path_cost);
        self.predecessors.insert(neighbor_id, current_id);
      }

      let estimate = heuristic.map_or(0.0, |h| h((neighbor_id, &neighbor.data), target));
      match options.stale_entries {
        StaleEntries::Skip => {
          if improved {
            self.queue.enqueue(neighbor_id, path_cost + estimate);
          }
        }
        StaleEntries::Remove => {
          self.queue.remove_all(|id| *id == neighbor_id);
          let distance = self.distance(neighbor_id).unwrap_or(f64::INFINITY);
          self.queue.enqueue(neighbor_id, distance + estimate);
        }
      }
    }

    self.closed.insert(current_id);
    Ok(Progress::Expanded(current_id))
  }

  /// Follows the predecessors from `target` back to the source. The result is
  /// ordered from source to target.
  pub fn reconstruct<D, E>(
    &self,
    graph: &Graph<D, E>,
    target: VertexId,
  ) -> Result<Vec<VertexId>, PathError> {
    if !graph.contains_vertex(target) {
      return Err(PathError::VertexNotFound {
        id: target,
        role: VertexRole::Target,
      });
    }

    let mut result = vec![target];
    let mut current_node = target;
    while let Some(&predecessor) = self.predecessors.get(&current_node) {
      // A chain longer than the number of predecessors is a cycle
      if !graph.contains_vertex(predecessor) || result.len() > self.predecessors.len() {
        return Err(PathError::Reconstruction {
          vertex: current_node,
          missing: predecessor,
        });
      }
      result.push(predecessor);
      current_node = predecessor;
    }
    result.reverse();
    Ok(result)
  }
}
