//! Simulated camera, detector and classifier

use handsign_core::{
    FeatureVector, FrameBounds, HandPose, HandsignError, HandsignResult, Keypoint,
    HAND_KEYPOINT_COUNT, LABEL_COUNT,
};
use handsign_landmark::LandmarkNormalizer;
use handsign_runtime::{Detection, GestureClassifier, HandDetector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{template_pose, FrameFate, HandPlacement, NoiseConfig};

/// One simulated frame
#[derive(Debug, Clone, PartialEq)]
pub struct SimFrame {
    pub bounds: FrameBounds,
    /// Keypoints the detector will report
    pub hand: Option<Vec<Keypoint>>,
    /// Label the hand was meant to show
    pub truth: usize,
    /// Label whose shape is actually in the frame
    pub shown: Option<usize>,
    pub fate: FrameFate,
}

/// Renders label shapes into noisy frames
#[derive(Debug)]
pub struct SimulatedCamera {
    rng: StdRng,
    noise: NoiseConfig,
    bounds: FrameBounds,
    placement: HandPlacement,
}

impl SimulatedCamera {
    pub fn new(noise: NoiseConfig, seed: u64) -> Self {
        SimulatedCamera {
            rng: StdRng::seed_from_u64(seed),
            noise,
            bounds: FrameBounds::new(640, 480),
            placement: HandPlacement::default(),
        }
    }

    pub fn with_placement(mut self, placement: HandPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    /// Capture a frame of the hand showing `label_index`
    pub fn capture(&mut self, label_index: usize) -> SimFrame {
        let fate = FrameFate::roll(&self.noise, &mut self.rng);

        let shown = match fate {
            FrameFate::Flipped => {
                let other = self.rng.gen_range(0..LABEL_COUNT - 1);
                if other >= label_index {
                    other + 1
                } else {
                    other
                }
            }
            _ => label_index,
        };

        let hand = match fate {
            FrameFate::Dropped => None,
            _ => {
                let mut keypoints: Vec<Keypoint> = template_pose(shown, self.placement)
                    .into_iter()
                    .map(|kp| {
                        let x = kp.x + self.noise.jitter(&mut self.rng);
                        let y = kp.y + self.noise.jitter(&mut self.rng);
                        // Detectors report whole pixels
                        Keypoint::new(x.trunc(), y.trunc(), kp.z)
                    })
                    .collect();
                if fate == FrameFate::Partial {
                    let keep = self.rng.gen_range(1..HAND_KEYPOINT_COUNT);
                    keypoints.truncate(keep);
                }
                Some(keypoints)
            }
        };

        SimFrame {
            bounds: self.bounds,
            shown: hand.as_ref().map(|_| shown),
            hand,
            truth: label_index,
            fate,
        }
    }
}

/// Detector that reads the hand straight out of a [`SimFrame`]
#[derive(Debug, Default)]
pub struct SimulatedDetector {
    pub calls: u64,
}

impl HandDetector for SimulatedDetector {
    type Frame = SimFrame;

    fn detect(&mut self, frame: &SimFrame) -> HandsignResult<Detection> {
        self.calls += 1;
        Ok(match &frame.hand {
            Some(keypoints) => Detection::pixels(frame.bounds, keypoints.clone()),
            None => Detection::empty(frame.bounds),
        })
    }
}

/// Nearest-template classifier
///
/// Scores every label by squared distance to its normalized template shape
/// and turns scores into probabilities with a softmax at `temperature`.
#[derive(Debug, Clone)]
pub struct TemplateClassifier {
    templates: Vec<FeatureVector>,
    temperature: f32,
}

impl TemplateClassifier {
    /// Temperature giving clean-frame confidence around 0.97
    pub const DEFAULT_TEMPERATURE: f32 = 0.5;

    pub fn new(normalizer: &LandmarkNormalizer, temperature: f32) -> HandsignResult<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(HandsignError::Configuration(format!(
                "temperature must be positive, got {}",
                temperature
            )));
        }

        let mut templates = Vec::with_capacity(LABEL_COUNT);
        for label in 0..LABEL_COUNT {
            let pose = HandPose::from_keypoints(&template_pose(label, HandPlacement::default()))?;
            let features = normalizer.normalize(Some(&pose)).ok_or_else(|| {
                HandsignError::Classifier(format!("template {} did not normalize", label))
            })?;
            templates.push(features);
        }

        Ok(TemplateClassifier {
            templates,
            temperature,
        })
    }

    /// Squared distance from `features` to each template
    pub fn distances(&self, features: &FeatureVector) -> Vec<f32> {
        self.templates
            .iter()
            .map(|t| {
                t.as_slice()
                    .iter()
                    .zip(features.as_slice())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum()
            })
            .collect()
    }
}

impl GestureClassifier for TemplateClassifier {
    fn classify(&mut self, features: &FeatureVector) -> HandsignResult<Vec<f32>> {
        if features.len() != self.templates[0].len() {
            return Err(HandsignError::Classifier(format!(
                "expected {} features, got {}",
                self.templates[0].len(),
                features.len()
            )));
        }

        let distances = self.distances(features);
        let nearest = distances.iter().cloned().fold(f32::INFINITY, f32::min);
        let scores: Vec<f32> = distances
            .iter()
            .map(|d| (-(d - nearest) / self.temperature).exp())
            .collect();
        let total: f32 = scores.iter().sum();

        Ok(scores.into_iter().map(|s| s / total).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> TemplateClassifier {
        TemplateClassifier::new(
            &LandmarkNormalizer::default(),
            TemplateClassifier::DEFAULT_TEMPERATURE,
        )
        .unwrap()
    }

    fn argmax(dist: &[f32]) -> usize {
        let mut best = 0;
        for (i, p) in dist.iter().enumerate() {
            if *p > dist[best] {
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_clean_frames_classify_correctly() {
        let normalizer = LandmarkNormalizer::default();
        let mut classifier = classifier();
        let mut camera = SimulatedCamera::new(NoiseConfig::clean(), 3);

        for label in 0..LABEL_COUNT {
            let frame = camera.capture(label);
            let pose = HandPose::from_keypoints(frame.hand.as_ref().unwrap()).unwrap();
            let features = normalizer.normalize(Some(&pose)).unwrap();
            let dist = classifier.classify(&features).unwrap();

            assert_eq!(dist.len(), LABEL_COUNT);
            assert!((dist.iter().sum::<f32>() - 1.0).abs() < 1e-4);
            assert_eq!(argmax(&dist), label);
            assert!(dist[label] > 0.9, "label {} confidence {}", label, dist[label]);
        }
    }

    #[test]
    fn test_jittered_frames_classify_correctly() {
        let normalizer = LandmarkNormalizer::default();
        let mut classifier = classifier();
        let noise = NoiseConfig {
            keypoint_jitter_px: 3.0,
            ..NoiseConfig::clean()
        };
        let mut camera = SimulatedCamera::new(noise, 11);

        for i in 0..200 {
            let label = i % LABEL_COUNT;
            let frame = camera.capture(label);
            let pose = HandPose::from_keypoints(frame.hand.as_ref().unwrap()).unwrap();
            let features = normalizer.normalize(Some(&pose)).unwrap();
            let dist = classifier.classify(&features).unwrap();
            assert_eq!(argmax(&dist), label);
            assert!(dist[label] > 0.7);
        }
    }

    #[test]
    fn test_camera_fates() {
        let noise = NoiseConfig {
            keypoint_jitter_px: 0.0,
            drop_rate: 0.3,
            partial_rate: 0.3,
            flip_rate: 0.3,
        };
        let mut camera = SimulatedCamera::new(noise, 5);

        for _ in 0..500 {
            let frame = camera.capture(4);
            assert_eq!(frame.truth, 4);
            assert_eq!(frame.shown.is_some(), frame.hand.is_some());
            if frame.fate == FrameFate::Flipped {
                assert_ne!(frame.shown, Some(4));
            }
            match frame.fate {
                FrameFate::Dropped => assert!(frame.hand.is_none()),
                FrameFate::Partial => {
                    let n = frame.hand.as_ref().unwrap().len();
                    assert!(n >= 1 && n < HAND_KEYPOINT_COUNT);
                }
                FrameFate::Flipped => {
                    let hand = frame.hand.as_ref().unwrap();
                    assert_eq!(hand.len(), HAND_KEYPOINT_COUNT);
                    let own = template_pose(4, HandPlacement::default());
                    let same = hand
                        .iter()
                        .zip(&own)
                        .all(|(a, b)| a.x == b.x.trunc() && a.y == b.y.trunc());
                    assert!(!same);
                }
                FrameFate::Intact => {
                    assert_eq!(frame.hand.as_ref().unwrap().len(), HAND_KEYPOINT_COUNT)
                }
            }
        }
    }

    #[test]
    fn test_detector_passthrough() {
        let mut camera = SimulatedCamera::new(NoiseConfig::clean(), 9);
        let mut detector = SimulatedDetector::default();

        let frame = camera.capture(0);
        let detection = detector.detect(&frame).unwrap();
        assert_eq!(detection.frame, camera.bounds());
        assert_eq!(detection.hand, frame.hand);
        assert_eq!(detector.calls, 1);
    }

    #[test]
    fn test_classifier_rejects_short_vector() {
        let mut classifier = classifier();
        let short = FeatureVector::from_vec(vec![0.0; 10]);
        assert!(matches!(
            classifier.classify(&short),
            Err(HandsignError::Classifier(_))
        ));
        assert!(TemplateClassifier::new(&LandmarkNormalizer::default(), 0.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_any_placement_classifies(
            label in 0usize..LABEL_COUNT,
            wrist_x in 150.0f32..450.0,
            wrist_y in 250.0f32..400.0,
            size in 90.0f32..150.0,
        ) {
            let normalizer = LandmarkNormalizer::default();
            let mut classifier = classifier();
            let placement = HandPlacement { wrist_x, wrist_y, size };
            let mut camera = SimulatedCamera::new(NoiseConfig::clean(), 1).with_placement(placement);

            let frame = camera.capture(label);
            let pose = HandPose::from_keypoints(frame.hand.as_ref().unwrap()).unwrap();
            let features = normalizer.normalize(Some(&pose)).unwrap();
            let dist = classifier.classify(&features).unwrap();
            prop_assert_eq!(argmax(&dist), label);
            prop_assert!(dist[label] > 0.7);
        }
    }
}
