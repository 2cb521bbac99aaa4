//! History window - fixed-capacity FIFO of recent predictions

use std::collections::VecDeque;

use handsign_core::{HandsignError, HandsignResult, Prediction};

/// Recent accepted predictions, oldest first
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    capacity: usize,
    entries: VecDeque<Prediction>,
}

impl HistoryWindow {
    /// Create an empty window holding at most `capacity` predictions
    pub fn new(capacity: usize) -> HandsignResult<Self> {
        if capacity == 0 {
            return Err(HandsignError::Configuration(
                "history window capacity must be positive".into(),
            ));
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    /// Append a prediction, returning the evicted oldest entry when full
    pub fn push(&mut self, prediction: Prediction) -> Option<Prediction> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(prediction);
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.entries.iter()
    }

    /// Label with the most entries; ties go to the label seen first
    pub fn majority_label(&self) -> Option<&str> {
        // (label, count) in first-seen order
        let mut tally: Vec<(&str, usize)> = Vec::with_capacity(self.capacity);
        for entry in &self.entries {
            match tally.iter_mut().find(|(label, _)| *label == entry.label.as_str()) {
                Some((_, count)) => *count += 1,
                None => tally.push((entry.label.as_str(), 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (label, count) in tally {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Mean confidence over every entry, 0 when empty
    pub fn mean_confidence(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: f64 = self.entries.iter().map(|p| p.confidence as f64).sum();
        (total / self.entries.len() as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(capacity: usize, entries: &[(&str, f32)]) -> HistoryWindow {
        let mut window = HistoryWindow::new(capacity).unwrap();
        for (label, confidence) in entries {
            window.push(Prediction::new(*label, *confidence));
        }
        window
    }

    #[test]
    fn test_window_eviction() {
        let mut window = HistoryWindow::new(2).unwrap();
        assert!(window.push(Prediction::new("A", 0.9)).is_none());
        assert!(window.push(Prediction::new("B", 0.8)).is_none());
        assert!(window.is_full());

        let evicted = window.push(Prediction::new("C", 0.7)).unwrap();
        assert_eq!(evicted, Prediction::new("A", 0.9));
        assert_eq!(window.len(), 2);

        let labels: Vec<&str> = window.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C"]);
    }

    #[test]
    fn test_majority_label() {
        let window = window_of(5, &[("A", 0.9), ("B", 0.9), ("B", 0.9), ("C", 0.9)]);
        assert_eq!(window.majority_label(), Some("B"));
        assert_eq!(HistoryWindow::new(3).unwrap().majority_label(), None);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let window = window_of(5, &[("A", 0.9), ("B", 0.9)]);
        assert_eq!(window.majority_label(), Some("A"));

        // B is seen first even though A reaches two first
        let window = window_of(5, &[("B", 0.9), ("A", 0.9), ("A", 0.9), ("B", 0.9)]);
        assert_eq!(window.majority_label(), Some("B"));
    }

    #[test]
    fn test_mean_confidence() {
        assert_eq!(HistoryWindow::new(3).unwrap().mean_confidence(), 0.0);

        let window = window_of(3, &[("A", 0.5), ("B", 1.0), ("A", 0.75), ("C", 0.25)]);
        // 0.5 was evicted
        assert!((window.mean_confidence() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = HistoryWindow::new(0).unwrap_err();
        assert!(matches!(err, HandsignError::Configuration(_)));

        let mut window = HistoryWindow::new(1).unwrap();
        window.push(Prediction::new("A", 0.9));
        window.push(Prediction::new("B", 0.8));
        assert!(window.len() <= window.capacity());
        assert_eq!(window.majority_label(), Some("B"));
    }
}
