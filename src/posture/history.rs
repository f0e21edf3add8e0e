use std::collections::VecDeque;

use crate::model::verdict::PostureLabel;

pub const DEFAULT_CAPACITY: usize = 60;

/// Bounded window of recent known posture labels, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    labels: VecDeque<PostureLabel>,
    capacity: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub good: usize,
    pub average: usize,
    pub bad: usize,
}

impl HistoryTracker {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Unknown labels are never recorded.
    pub fn record(&mut self, label: PostureLabel) {
        if label == PostureLabel::Unknown {
            return;
        }
        self.labels.push_back(label);
        while self.labels.len() > self.capacity {
            self.labels.pop_front();
        }
    }

    pub fn good_percent(&self) -> u8 {
        if self.is_empty() {
            return 0;
        }
        let good = self.counts().good;
        ((good as f64 / self.labels.len() as f64) * 100.0).round() as u8
    }

    pub fn counts(&self) -> LabelCounts {
        let mut counts = LabelCounts::default();
        for label in &self.labels {
            match label {
                PostureLabel::Good => counts.good += 1,
                PostureLabel::Average => counts.average += 1,
                PostureLabel::Bad => counts.bad += 1,
                PostureLabel::Unknown => {}
            }
        }
        counts
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = PostureLabel> + '_ {
        self.labels.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/posture/history.rs"]
mod tests;
