use std::{collections::VecDeque, num::NonZeroUsize};

use crate::Coordinate;

/// Fixed capacity FIFO of the most recent positions of a vessel.
#[derive(Debug, Clone)]
pub struct TrackHistory {
    capacity: NonZeroUsize,
    positions: VecDeque<Coordinate>,
}

impl TrackHistory {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            positions: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// Appends a position, returning the evicted oldest position if the history was full.
    pub fn push(&mut self, position: Coordinate) -> Option<Coordinate> {
        let evicted = if self.positions.len() == self.capacity.get() {
            self.positions.pop_front()
        } else {
            None
        };
        self.positions.push_back(position);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn latest(&self) -> Option<&Coordinate> {
        self.positions.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.positions.iter()
    }

    pub fn to_vec(&self) -> Vec<Coordinate> {
        self.positions.iter().copied().collect()
    }
}
