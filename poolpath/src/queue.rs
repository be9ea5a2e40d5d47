//! Min-priority queues keyed by a floating point priority.

use std::cmp::Ordering;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("dequeue on an empty priority queue")]
pub struct EmptyQueue;

/// Common interface of the queues in this module.
pub trait MinQueue<T> {
  fn enqueue(&mut self, item: T, priority: f64);
  fn dequeue(&mut self) -> Result<T, EmptyQueue>;
  fn remove_all<F: FnMut(&T) -> bool>(&mut self, predicate: F) -> usize;
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

struct Entry<T> {
  priority: f64,
  sequence: u64,
  item: T,
}

impl<T> Entry<T> {
  // Equal priorities are served in insertion order
  fn precedes(&self, other: &Self) -> bool {
    match self.priority.total_cmp(&other.priority) {
      Ordering::Less => true,
      Ordering::Greater => false,
      Ordering::Equal => self.sequence < other.sequence,
    }
  }
}

/// Binary min-heap over `(item, priority)` pairs.
///
/// Items are not deduplicated: the same item may be enqueued several times with
/// different priorities.
pub struct PriorityQueue<T> {
  items: Vec<Entry<T>>,
  sequence: u64,
}

impl<T> Default for PriorityQueue<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> PriorityQueue<T> {
  pub fn new() -> Self {
    PriorityQueue {
      items: Vec::new(),
      sequence: 0,
    }
  }

  pub fn with_capacity(capacity: usize) -> Self {
    PriorityQueue {
      items: Vec::with_capacity(capacity),
      sequence: 0,
    }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn clear(&mut self) {
    self.items.clear();
  }

  pub fn peek(&self) -> Option<(&T, f64)> {
    self.items.first().map(|entry| (&entry.item, entry.priority))
  }

  pub fn enqueue(&mut self, item: T, priority: f64) {
    self.items.push(Entry {
      priority,
      sequence: self.sequence,
      item,
    });
    self.sequence += 1;
    self.move_up_in_tree(self.items.len() - 1);
  }

  pub fn dequeue(&mut self) -> Result<T, EmptyQueue> {
    self.dequeue_with_priority().map(|(item, _)| item)
  }

  pub fn dequeue_with_priority(&mut self) -> Result<(T, f64), EmptyQueue> {
    if self.items.is_empty() {
      return Err(EmptyQueue);
    }
    let min = self.items.swap_remove(0);
    if !self.items.is_empty() {
      self.move_down_in_tree(0);
    }
    Ok((min.item, min.priority))
  }

  /// Removes every item matching `predicate` and restores the heap order.
  /// Returns the number of removed items.
  pub fn remove_all<F: FnMut(&T) -> bool>(&mut self, mut predicate: F) -> usize {
    let before = self.items.len();
    self.items.retain(|entry| !predicate(&entry.item));
    let removed = before - self.items.len();
    if removed > 0 {
      for position in (0..self.items.len() / 2).rev() {
        self.move_down_in_tree(position);
      }
    }
    removed
  }

  fn move_up_in_tree(&mut self, mut position: usize) {
    while position > 0 {
      let parent = (position - 1) / 2;
      if !self.items[position].precedes(&self.items[parent]) {
        return;
      }
      self.items.swap(position, parent);
      position = parent;
    }
  }

  fn move_down_in_tree(&mut self, mut position: usize) {
    let len = self.items.len();
    loop {
      let left = 2 * position + 1;
      if left >= len {
        return;
      }
      let right = left + 1;
      let smallest_child = if right < len && self.items[right].precedes(&self.items[left]) {
        right
      } else {
        left
      };
      if !self.items[smallest_child].precedes(&self.items[position]) {
        return;
      }
      self.items.swap(position, smallest_child);
      position = smallest_child;
    }
  }
}

impl<T> MinQueue<T> for PriorityQueue<T> {
  fn enqueue(&mut self, item: T, priority: f64) {
    PriorityQueue::enqueue(self, item, priority)
  }

  fn dequeue(&mut self) -> Result<T, EmptyQueue> {
    PriorityQueue::dequeue(self)
  }

  fn remove_all<F: FnMut(&T) -> bool>(&mut self, predicate: F) -> usize {
    PriorityQueue::remove_all(self, predicate)
  }

  fn len(&self) -> usize {
    PriorityQueue::len(self)
  }
}

/// Reference queue which keeps its items fully sorted.
///
/// Every enqueue costs `O(n log n)`. Only meant as a baseline for checking
/// [`PriorityQueue`], never for routing on real graphs.
#[derive(Default)]
pub struct SortedQueue<T> {
  items: Vec<(T, f64)>,
}

impl<T> SortedQueue<T> {
  pub fn new() -> Self {
    SortedQueue { items: Vec::new() }
  }
}

impl<T> MinQueue<T> for SortedQueue<T> {
  fn enqueue(&mut self, item: T, priority: f64) {
    self.items.push((item, priority));
    // Stable sort keeps insertion order for equal priorities
    self.items.sort_by(|a, b| a.1.total_cmp(&b.1));
  }

  fn dequeue(&mut self) -> Result<T, EmptyQueue> {
    if self.items.is_empty() {
      return Err(EmptyQueue);
    }
    Ok(self.items.remove(0).0)
  }

  fn remove_all<F: FnMut(&T) -> bool>(&mut self, mut predicate: F) -> usize {
    let before = self.items.len();
    self.items.retain(|(item, _)| !predicate(item));
    before - self.items.len()
  }

  fn len(&self) -> usize {
    self.items.len()
  }
}
