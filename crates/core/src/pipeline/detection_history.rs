use std::collections::VecDeque;

use crate::shared::constants::HISTORY_CAPACITY;
use crate::shared::detection::Detection;

/// Bounded display log of smoothed detections, newest first.
#[derive(Debug, Clone)]
pub struct DetectionHistory {
    capacity: usize,
    entries: VecDeque<Detection>,
}

impl DetectionHistory {
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, detection: Detection) {
        self.entries.push_front(detection);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&Detection> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DetectionHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
