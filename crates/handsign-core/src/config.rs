//! Recognizer configuration
//!
//! Passed explicitly to every component at construction. Components call
//! [`RecognizerConfig::validate`] once in their constructor and never re-check
//! per frame.

use crate::{HandsignError, HandsignResult, LabelSet, HAND_KEYPOINT_COUNT};

/// Recognizer tunables
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Keypoints per hand; fixed by the detector
    pub hand_keypoint_count: usize,
    /// Number of recent predictions kept for the majority vote
    pub history_window_capacity: usize,
    /// Classifier confidence a frame must exceed to reach the stabilizer
    pub gesture_confidence_threshold: f32,
    /// Ordered classifier labels
    pub label_set: LabelSet,
    /// Padding added around the hand region of interest, in pixels
    pub bounding_box_padding_px: u32,
    /// Lower bound for an axis range during normalization
    pub degenerate_axis_range_floor: f32,
    /// Sanity bound for x/y in the validity check
    pub validity_coordinate_bound: f32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            hand_keypoint_count: HAND_KEYPOINT_COUNT,
            history_window_capacity: 5,
            gesture_confidence_threshold: 0.7,
            label_set: LabelSet::asl_alphabet(),
            bounding_box_padding_px: 20,
            degenerate_axis_range_floor: 1.0,
            validity_coordinate_bound: 1000.0,
        }
    }
}

impl RecognizerConfig {
    /// Short window: reacts within a few frames, flickers more
    pub fn responsive() -> Self {
        RecognizerConfig {
            history_window_capacity: 3,
            ..Self::default()
        }
    }

    /// Long window and stricter gate for noisy lighting
    pub fn steady() -> Self {
        RecognizerConfig {
            history_window_capacity: 9,
            gesture_confidence_threshold: 0.8,
            ..Self::default()
        }
    }

    /// Check every tunable, failing on the first bad one
    pub fn validate(&self) -> HandsignResult<()> {
        if self.hand_keypoint_count != HAND_KEYPOINT_COUNT {
            return Err(HandsignError::Configuration(format!(
                "hand_keypoint_count is fixed at {}, got {}",
                HAND_KEYPOINT_COUNT, self.hand_keypoint_count
            )));
        }

        if self.history_window_capacity == 0 {
            return Err(HandsignError::Configuration(
                "history_window_capacity must be positive".into(),
            ));
        }

        let threshold = self.gesture_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(HandsignError::Configuration(format!(
                "gesture_confidence_threshold must be in [0, 1], got {}",
                threshold
            )));
        }

        self.label_set.validate()?;

        let floor = self.degenerate_axis_range_floor;
        if !floor.is_finite() || floor <= 0.0 {
            return Err(HandsignError::Configuration(format!(
                "degenerate_axis_range_floor must be positive, got {}",
                floor
            )));
        }

        let bound = self.validity_coordinate_bound;
        if !bound.is_finite() || bound <= 0.0 {
            return Err(HandsignError::Configuration(format!(
                "validity_coordinate_bound must be positive, got {}",
                bound
            )));
        }

        Ok(())
    }
}
