//! Landmark smoothing - moving average over recent feature vectors

use std::collections::VecDeque;

use handsign_core::{FeatureVector, HandsignError, HandsignResult, FEATURE_VECTOR_LEN};

/// Element-wise moving average of the last `window` feature vectors
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    window: usize,
    recent: VecDeque<FeatureVector>,
}

impl LandmarkSmoother {
    /// Create a smoother over `window` frames
    pub fn new(window: usize) -> HandsignResult<Self> {
        if window == 0 {
            return Err(HandsignError::Configuration(
                "smoothing window must be positive".into(),
            ));
        }
        Ok(LandmarkSmoother {
            window,
            recent: VecDeque::with_capacity(window),
        })
    }

    /// Add a vector and return the current average
    pub fn push(&mut self, vector: FeatureVector) -> HandsignResult<FeatureVector> {
        if vector.len() != FEATURE_VECTOR_LEN {
            return Err(HandsignError::InvalidFeatureVector(format!(
                "expected {} values, got {}",
                FEATURE_VECTOR_LEN,
                vector.len()
            )));
        }

        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(vector);

        // Non-empty: we just pushed
        Ok(self.mean().unwrap_or_default())
    }

    /// Average of the retained vectors, `None` when empty
    pub fn mean(&self) -> Option<FeatureVector> {
        if self.recent.is_empty() {
            return None;
        }

        let mut sum = vec![0.0f32; FEATURE_VECTOR_LEN];
        for vector in &self.recent {
            for (acc, v) in sum.iter_mut().zip(vector.as_slice()) {
                *acc += v;
            }
        }

        let n = self.recent.len() as f32;
        Some(FeatureVector::from_vec(sum.into_iter().map(|s| s / n).collect()))
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}
