use std::collections::VecDeque;

use crate::config::DEFAULT_QUEUE_CAPACITY;
use crate::input::{direction_change_is_valid, Direction};

/// Pending turns waiting for the next ticks, oldest first.
///
/// Each turn is validated against the direction the snake will be facing
/// when it is applied: the last queued turn, or the committed direction when
/// nothing is queued. Reversals and repeats are dropped here so that a quick
/// double tap can never steer the head back into the neck.
#[derive(Debug, Clone)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
    capacity: usize,
}

impl DirectionQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            pending: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Buffers `direction` if it is a legal turn from the projected heading.
    ///
    /// Returns `false` when the turn was rejected. When the queue is full the
    /// oldest pending turn is evicted.
    pub fn enqueue(&mut self, direction: Direction, current: Direction) -> bool {
        let last_effective = self.pending.back().copied().unwrap_or(current);
        if !direction_change_is_valid(last_effective, direction) {
            return false;
        }

        self.pending.push_back(direction);
        if self.pending.len() > self.capacity {
            let _ = self.pending.pop_front();
        }
        true
    }

    /// Pops the oldest pending turn.
    pub fn dequeue(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over pending turns, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}

impl Default for DirectionQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
