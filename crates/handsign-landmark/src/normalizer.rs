//! Landmark Normalizer - pose-invariant feature vectors
//!
//! The transform must match what the classifier saw at training time:
//! 1. Translate so the wrist is the origin (x, y and z)
//! 2. Take the min/max of x and, separately, of y
//! 3. Floor each axis range at `degenerate_axis_range_floor`
//! 4. Map each axis into [-1, 1] with `(v - min) / range * 2 - 1`
//! 5. Leave z translated but unscaled
//!
//! x and y are scaled independently, so the hand's aspect ratio is not kept.

use handsign_core::{
    FeatureVector, FrameBounds, HandPose, HandsignError, HandsignResult, Keypoint, PixelRect,
    RecognizerConfig, FEATURE_VECTOR_LEN, KEYPOINT_DIMENSIONS,
};

/// Minimum and extent of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSpan {
    min: f32,
    range: f32,
}

impl AxisSpan {
    fn of(values: impl Iterator<Item = f32>, floor: f32) -> Self {
        let (min, max) = values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let range = max - min;
        AxisSpan {
            min,
            range: if range < floor { floor } else { range },
        }
    }

    #[inline]
    fn rescale(&self, v: f32) -> f32 {
        (v - self.min) / self.range * 2.0 - 1.0
    }
}

/// Landmark normalizer
#[derive(Debug, Clone)]
pub struct LandmarkNormalizer {
    range_floor: f32,
    padding_px: u32,
    coordinate_bound: f32,
}

impl Default for LandmarkNormalizer {
    fn default() -> Self {
        let config = RecognizerConfig::default();
        LandmarkNormalizer {
            range_floor: config.degenerate_axis_range_floor,
            padding_px: config.bounding_box_padding_px,
            coordinate_bound: config.validity_coordinate_bound,
        }
    }
}

impl LandmarkNormalizer {
    /// Create a normalizer, validating the configuration
    pub fn new(config: &RecognizerConfig) -> HandsignResult<Self> {
        config.validate()?;
        Ok(LandmarkNormalizer {
            range_floor: config.degenerate_axis_range_floor,
            padding_px: config.bounding_box_padding_px,
            coordinate_bound: config.validity_coordinate_bound,
        })
    }

    /// Normalize a pose; no pose means no feature vector this frame
    pub fn normalize(&self, pose: Option<&HandPose>) -> Option<FeatureVector> {
        let pose = pose?;
        let wrist = *pose.wrist();

        let translated: Vec<Keypoint> = pose
            .keypoints()
            .iter()
            .map(|kp| kp.offset_from(&wrist))
            .collect();

        let x_span = AxisSpan::of(translated.iter().map(|kp| kp.x), self.range_floor);
        let y_span = AxisSpan::of(translated.iter().map(|kp| kp.y), self.range_floor);

        let mut values = Vec::with_capacity(FEATURE_VECTOR_LEN);
        for kp in &translated {
            values.push(x_span.rescale(kp.x));
            values.push(y_span.rescale(kp.y));
            values.push(kp.z);
        }

        Some(FeatureVector::from_vec(values))
    }

    /// Normalize raw detector keypoints, rejecting partial hands
    pub fn normalize_keypoints(
        &self,
        keypoints: Option<&[Keypoint]>,
    ) -> HandsignResult<Option<FeatureVector>> {
        let Some(keypoints) = keypoints else {
            return Ok(None);
        };
        let pose = HandPose::from_keypoints(keypoints)?;
        Ok(self.normalize(Some(&pose)))
    }

    /// Check a flat vector (normalized or still in pixels)
    pub fn validate(&self, vector: &[f32]) -> HandsignResult<()> {
        if vector.len() != FEATURE_VECTOR_LEN {
            return Err(HandsignError::InvalidFeatureVector(format!(
                "expected {} values, got {}",
                FEATURE_VECTOR_LEN,
                vector.len()
            )));
        }

        if let Some(i) = vector.iter().position(|v| !v.is_finite()) {
            return Err(HandsignError::InvalidFeatureVector(format!(
                "non-finite value at index {}",
                i
            )));
        }

        let bound = self.coordinate_bound;
        for (kp, chunk) in vector.chunks_exact(KEYPOINT_DIMENSIONS).enumerate() {
            let (x, y) = (chunk[0], chunk[1]);
            if x < -bound || x > bound || y < -bound || y > bound {
                return Err(HandsignError::InvalidFeatureVector(format!(
                    "keypoint {} out of range: ({}, {})",
                    kp, x, y
                )));
            }
        }

        Ok(())
    }

    /// True iff the vector passes [`validate`](Self::validate)
    pub fn is_valid(&self, vector: &[f32]) -> bool {
        self.validate(vector).is_ok()
    }

    /// Padded bounding box of the hand, clipped to the frame
    ///
    /// Works on pixel-space poses. `None` if there is no pose or the clipped
    /// box is empty.
    pub fn region_of_interest(
        &self,
        frame: FrameBounds,
        pose: Option<&HandPose>,
    ) -> Option<PixelRect> {
        let pose = pose?;
        let pad = self.padding_px as i64;

        let mut x_lo = i64::MAX;
        let mut x_hi = i64::MIN;
        let mut y_lo = i64::MAX;
        let mut y_hi = i64::MIN;
        for kp in pose.keypoints() {
            // Truncating cast, NaN becomes 0
            let (x, y) = (kp.x as i64, kp.y as i64);
            x_lo = x_lo.min(x);
            x_hi = x_hi.max(x);
            y_lo = y_lo.min(y);
            y_hi = y_hi.max(y);
        }

        let left = x_lo.saturating_sub(pad).max(0);
        let top = y_lo.saturating_sub(pad).max(0);
        let right = x_hi.saturating_add(pad).min(frame.width as i64);
        let bottom = y_hi.saturating_add(pad).min(frame.height as i64);

        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelRect::new(
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}
