use std::collections::{HashSet, VecDeque};

use crate::error::SnakeError;
use crate::grid::Cell;
use crate::input::Direction;

/// Ordered snake segments (front is head) paired with an occupancy set.
///
/// The set always mirrors the deque exactly; the only mutators are
/// [`SnakeBody::push_head`] and [`SnakeBody::pop_tail`].
#[derive(Debug, Clone)]
pub struct SnakeBody {
    segments: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl SnakeBody {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// extending backwards against `direction`.
    #[must_use]
    pub fn straight(head: Cell, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let mut segments = VecDeque::with_capacity(length);
        let mut occupied = HashSet::with_capacity(length);

        for index in 0..length {
            let distance = i32::try_from(index).unwrap_or(i32::MAX);
            let cell = head.offset(direction, -distance);
            segments.push_back(cell);
            occupied.insert(cell);
        }

        Self { segments, occupied }
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(segments: Vec<Cell>) -> Result<Self, SnakeError> {
        if segments.is_empty() {
            return Err(SnakeError::Empty);
        }

        let mut occupied = HashSet::with_capacity(segments.len());
        for cell in &segments {
            if !occupied.insert(*cell) {
                return Err(SnakeError::DuplicateSegment {
                    x: cell.x,
                    y: cell.y,
                });
            }
        }

        Ok(Self {
            segments: VecDeque::from(segments),
            occupied,
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .segments
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .segments
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Prepends a new head, growing by one.
    pub fn push_head(&mut self, cell: Cell) {
        debug_assert!(!self.occupied.contains(&cell), "head moved onto the body");
        self.segments.push_front(cell);
        self.occupied.insert(cell);
    }

    /// Removes and returns the tail, shrinking by one.
    ///
    /// Returns `None` instead of emptying a single-segment snake.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.segments.len() <= 1 {
            return None;
        }

        let tail = self.segments.pop_back()?;
        self.occupied.remove(&tail);
        Some(tail)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Read-only view of the occupancy set.
    #[must_use]
    pub fn occupancy(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.segments.iter()
    }
}
