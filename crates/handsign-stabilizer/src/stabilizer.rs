//! Prediction Stabilizer - windowed majority vote over accepted predictions
//!
//! The stabilizer only sees predictions that already passed the confidence
//! gate. Every accepted prediction is pushed into the history window and the
//! stabilized output is recomputed from the whole window:
//! - label: most frequent label, ties to the label seen first
//! - confidence: mean of all confidences in the window
//!
//! Rejected input leaves the state untouched, so one bad frame never resets
//! tracking.

use handsign_core::{HandsignError, HandsignResult, LabelSet, Prediction, RecognizerConfig};
use tracing::{debug, trace};

use crate::HistoryWindow;

/// Stabilizer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizerPhase {
    /// Empty history, no prediction
    Idle,
    /// At least one prediction in the history
    Tracking,
}

/// Prediction stabilizer
#[derive(Debug, Clone)]
pub struct PredictionStabilizer {
    /// Recent accepted predictions
    window: HistoryWindow,
    /// Labels the classifier can produce
    labels: LabelSet,
    /// Cached output, recomputed on every accept
    current: Prediction,
}

impl PredictionStabilizer {
    /// Create a stabilizer, validating the configuration
    pub fn new(config: &RecognizerConfig) -> HandsignResult<Self> {
        config.validate()?;
        Ok(PredictionStabilizer {
            window: HistoryWindow::new(config.history_window_capacity)?,
            labels: config.label_set.clone(),
            current: Prediction::none(),
        })
    }

    /// Feed one gated per-frame prediction and return the stabilized output
    ///
    /// Fails without touching state if the label is not in the label set or
    /// the confidence is outside [0, 1].
    pub fn accept(&mut self, label: &str, confidence: f32) -> HandsignResult<Prediction> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(HandsignError::InvalidConfidence(confidence));
        }
        if !self.labels.contains(label) {
            return Err(HandsignError::UnknownLabel(label.to_string()));
        }

        trace!(label, confidence, "accept");
        if let Some(evicted) = self.window.push(Prediction::new(label, confidence)) {
            trace!(label = %evicted.label, "evicted");
        }

        let winner = self.window.majority_label().unwrap_or_default().to_string();
        let mean = self.window.mean_confidence();

        if winner != self.current.label {
            debug!(from = %self.current.label, to = %winner, "stabilized label changed");
        }
        self.current = Prediction::new(winner, mean);

        Ok(self.current.clone())
    }

    /// Feed a [`Prediction`], see [`accept`](Self::accept)
    pub fn accept_prediction(&mut self, prediction: &Prediction) -> HandsignResult<Prediction> {
        self.accept(&prediction.label, prediction.confidence)
    }

    /// Clear history and return to Idle; always succeeds
    pub fn reset(&mut self) {
        if self.phase() == StabilizerPhase::Tracking {
            debug!(dropped = self.window.len(), "stabilizer reset");
        }
        self.window.clear();
        self.current = Prediction::none();
    }

    /// Current stabilized prediction
    pub fn current(&self) -> &Prediction {
        &self.current
    }

    pub fn phase(&self) -> StabilizerPhase {
        if self.window.is_empty() {
            StabilizerPhase::Idle
        } else {
            StabilizerPhase::Tracking
        }
    }

    pub fn window(&self) -> &HistoryWindow {
        &self.window
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }
}
