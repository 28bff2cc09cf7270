//! Discrete-event building blocks shared by the simulation models
//!
//! - [`Timeline`]: min-ordered collection of items keyed by `(time, id)`
//! - [`parallel`]: run independent, indexed scenarios on a rayon pool

pub mod parallel;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    t: u64,
    id: usize,
    data: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    // BinaryHeap is a max-heap; reversing both keys makes the earliest time
    // (then the smallest id) come out first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.t.cmp(&self.t).then_with(|| other.id.cmp(&self.id))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Items ordered by the logical time they become due
///
/// Items are popped smallest time first. Equal times resolve to the smaller
/// id, so the order is total and independent of insertion order.
pub struct Timeline<T> {
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Timeline<T> {
    pub fn new() -> Timeline<T> {
        Timeline {
            queue: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, t: u64, id: usize, data: T) {
        self.queue.push(Entry { t, id, data });
    }

    /// Remove and return the earliest `(time, id, item)`
    pub fn pop(&mut self) -> Option<(u64, usize, T)> {
        self.queue.pop().map(|e| (e.t, e.id, e.data))
    }

    pub fn peek(&self) -> Option<(u64, usize, &T)> {
        self.queue.peek().map(|e| (e.t, e.id, &e.data))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Timeline::new()
    }
}

impl<T> FromIterator<(u64, usize, T)> for Timeline<T> {
    fn from_iter<I: IntoIterator<Item = (u64, usize, T)>>(iter: I) -> Self {
        let entries: Vec<Entry<T>> = iter
            .into_iter()
            .map(|(t, id, data)| Entry { t, id, data })
            .collect();
        Timeline {
            queue: BinaryHeap::from(entries),
        }
    }
}
