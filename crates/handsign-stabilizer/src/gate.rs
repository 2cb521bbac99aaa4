//! Confidence gate - turns a class distribution into a candidate prediction
//!
//! Runs before the stabilizer. Frames whose best class is not strictly above
//! the threshold never reach the history window.

use handsign_core::{HandsignError, HandsignResult, LabelSet, Prediction, RecognizerConfig};

/// Arg-max decoder with a confidence threshold
#[derive(Debug, Clone)]
pub struct ConfidenceGate {
    threshold: f32,
    labels: LabelSet,
}

impl ConfidenceGate {
    /// Create a gate, validating the configuration
    pub fn new(config: &RecognizerConfig) -> HandsignResult<Self> {
        config.validate()?;
        Ok(ConfidenceGate {
            threshold: config.gesture_confidence_threshold,
            labels: config.label_set.clone(),
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Best class of a distribution, whether or not it passes the gate
    ///
    /// The lowest index wins ties; NaN entries never win.
    pub fn best(&self, distribution: &[f32]) -> HandsignResult<Option<Prediction>> {
        if distribution.len() != self.labels.len() {
            return Err(HandsignError::InvalidDistribution {
                expected: self.labels.len(),
                actual: distribution.len(),
            });
        }

        let mut best: Option<(usize, f32)> = None;
        for (i, &p) in distribution.iter().enumerate() {
            if p.is_nan() {
                continue;
            }
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((i, p)),
            }
        }

        Ok(best.and_then(|(i, p)| {
            self.labels
                .get(i)
                .map(|label| Prediction::new(label, p.clamp(0.0, 1.0)))
        }))
    }

    /// Decode a distribution, `None` when the best class is at or below the threshold
    pub fn decode(&self, distribution: &[f32]) -> HandsignResult<Option<Prediction>> {
        Ok(self
            .best(distribution)?
            .filter(|p| p.confidence > self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_core::LABEL_COUNT;

    fn gate() -> ConfidenceGate {
        ConfidenceGate::new(&RecognizerConfig::default()).unwrap()
    }

    fn one_hot(index: usize, p: f32) -> Vec<f32> {
        let rest = (1.0 - p) / (LABEL_COUNT - 1) as f32;
        let mut dist = vec![rest; LABEL_COUNT];
        dist[index] = p;
        dist
    }

    #[test]
    fn test_decode_above_threshold() {
        let out = gate().decode(&one_hot(7, 0.92)).unwrap().unwrap();
        assert_eq!(out.label, "H");
        assert!((out.confidence - 0.92).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_is_strict() {
        let gate = gate();
        assert!(gate.decode(&one_hot(0, 0.7)).unwrap().is_none());
        assert!(gate.decode(&one_hot(0, 0.5)).unwrap().is_none());
        assert!(gate.decode(&one_hot(0, 0.7001)).unwrap().is_some());

        // Still reported by best()
        let best = gate.best(&one_hot(3, 0.5)).unwrap().unwrap();
        assert_eq!(best.label, "D");
    }

    #[test]
    fn test_first_index_wins_ties() {
        let mut dist = vec![0.0; LABEL_COUNT];
        dist[4] = 0.5;
        dist[2] = 0.5;
        let best = gate().best(&dist).unwrap().unwrap();
        assert_eq!(best.label, "C");
    }

    #[test]
    fn test_nan_entries_ignored() {
        let mut dist = one_hot(10, 0.9);
        dist[0] = f32::NAN;
        let out = gate().decode(&dist).unwrap().unwrap();
        assert_eq!(out.label, "K");

        let all_nan = vec![f32::NAN; LABEL_COUNT];
        assert!(gate().decode(&all_nan).unwrap().is_none());
    }

    #[test]
    fn test_wrong_length_is_invalid_input() {
        let err = gate().decode(&[0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            HandsignError::InvalidDistribution {
                expected: 26,
                actual: 2
            }
        );
        assert!(err.is_input_error());
    }
}
