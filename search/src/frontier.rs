//! Frontier strategies: FIFO and best-first.
//!
//! Both implement [`Frontier`], so drivers are written once and instantiated
//! with either ordering. Frontiers hold opaque items (node IDs or pending
//! entries); they know nothing about visitation. Stale entries for states
//! finalized after the push are filtered by the driver on pop (lazy deletion).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::FrontierKey;

/// An exploration order over pending items.
pub trait Frontier<T> {
    /// Add an item. FIFO frontiers ignore `key`.
    fn push(&mut self, key: FrontierKey, item: T);

    /// Remove the next item in this frontier's order.
    fn pop(&mut self) -> Option<T>;

    /// Current number of pending items (stale entries included).
    fn len(&self) -> usize;

    /// Whether no items are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest `len()` observed so far.
    fn high_water(&self) -> u64;
}

/// Breadth-first frontier: items pop in push order.
#[derive(Debug)]
pub struct FifoFrontier<T> {
    queue: VecDeque<T>,
    high_water: u64,
}

impl<T> FifoFrontier<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            high_water: 0,
        }
    }
}

impl<T> Default for FifoFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for FifoFrontier<T> {
    fn push(&mut self, _key: FrontierKey, item: T) {
        self.queue.push_back(item);
        self.high_water = self.high_water.max(self.queue.len() as u64);
    }

    fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// A heap entry wrapping an item with its ordering key.
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest `(f_cost, insertion_order)` first. Items never take part in the
/// comparison.
#[derive(Debug)]
struct HeapEntry<T> {
    key: Reverse<FrontierKey>,
    item: T,
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for HeapEntry<T> {}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier: min-priority by `f_cost`, stable on ties.
#[derive(Debug)]
pub struct BestFirstFrontier<T> {
    heap: BinaryHeap<HeapEntry<T>>,
    high_water: u64,
}

impl<T> BestFirstFrontier<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    /// Key of the item that `pop` would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }
}

impl<T> Default for BestFirstFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for BestFirstFrontier<T> {
    fn push(&mut self, key: FrontierKey, item: T) {
        self.heap.push(HeapEntry {
            key: Reverse(key),
            item,
        });
        self.high_water = self.high_water.max(self.heap.len() as u64);
    }

    fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}
