//! Recognizer - the per-frame pipeline
//!
//! One frame in, one outcome out. Only a `Stabilized` outcome touches the
//! stabilizer; every other outcome leaves the last stabilized prediction in
//! place.

use std::time::{Duration, Instant};

use handsign_core::{
    FeatureVector, HandPose, HandsignError, HandsignResult, PixelRect, Prediction,
    RecognizerConfig,
};
use handsign_landmark::{to_pixel_pose, LandmarkNormalizer, LandmarkSmoother};
use handsign_stabilizer::{ConfidenceGate, PredictionStabilizer, StabilizerPhase};
use tracing::{debug, info, warn};

use crate::{CoordinateSpace, Detection, GestureClassifier, HandDetector, RenderView, Renderer};

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No hand detected; not an error
    NoHand,
    /// Malformed input, frame skipped
    Rejected(HandsignError),
    /// Best class did not clear the confidence gate
    BelowThreshold(Prediction),
    /// Prediction accepted; carries the stabilized output
    Stabilized(Prediction),
}

impl FrameOutcome {
    pub fn is_stabilized(&self) -> bool {
        matches!(self, FrameOutcome::Stabilized(_))
    }

    /// Stabilized prediction, if this frame produced one
    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            FrameOutcome::Stabilized(p) => Some(p),
            _ => None,
        }
    }
}

/// Per-run counters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizerStats {
    pub frames: u64,
    pub no_hand: u64,
    pub rejected: u64,
    pub below_threshold: u64,
    pub accepted: u64,
    pub last_frame_duration: Duration,
}

/// Gesture recognizer over a detector and a classifier
pub struct Recognizer<D, C> {
    detector: D,
    classifier: C,
    renderer: Option<Box<dyn Renderer>>,
    normalizer: LandmarkNormalizer,
    smoother: Option<LandmarkSmoother>,
    gate: ConfidenceGate,
    stabilizer: PredictionStabilizer,
    last_region: Option<PixelRect>,
    stats: RecognizerStats,
}

impl<D, C> Recognizer<D, C>
where
    D: HandDetector,
    C: GestureClassifier,
{
    /// Create a recognizer; configuration errors surface here, never per frame
    pub fn new(config: &RecognizerConfig, detector: D, classifier: C) -> HandsignResult<Self> {
        let recognizer = Recognizer {
            detector,
            classifier,
            renderer: None,
            normalizer: LandmarkNormalizer::new(config)?,
            smoother: None,
            gate: ConfidenceGate::new(config)?,
            stabilizer: PredictionStabilizer::new(config)?,
            last_region: None,
            stats: RecognizerStats::default(),
        };

        info!(
            window = config.history_window_capacity,
            threshold = config.gesture_confidence_threshold,
            "recognizer created"
        );
        Ok(recognizer)
    }

    /// Attach a display sink
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Average feature vectors over `window` frames before classification
    pub fn with_landmark_smoothing(mut self, window: usize) -> HandsignResult<Self> {
        self.smoother = Some(LandmarkSmoother::new(window)?);
        Ok(self)
    }

    /// Run one frame through the pipeline
    ///
    /// Detector and classifier failures are returned as errors; malformed
    /// input becomes [`FrameOutcome::Rejected`].
    pub fn process_frame(&mut self, frame: &D::Frame) -> HandsignResult<FrameOutcome> {
        let started = Instant::now();

        let detection = self.detector.detect(frame)?;
        let bounds = detection.frame;
        let outcome = self.process_detection(detection)?;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&RenderView {
                frame: bounds,
                prediction: self.stabilizer.current(),
                region: self.last_region,
            });
        }

        self.stats.last_frame_duration = started.elapsed();
        Ok(outcome)
    }

    /// Run an already detected hand through the pipeline
    ///
    /// Counts toward [`stats`](Self::stats) like a full frame.
    pub fn process_detection(&mut self, detection: Detection) -> HandsignResult<FrameOutcome> {
        self.stats.frames += 1;
        let outcome = self.evaluate(detection)?;

        match &outcome {
            FrameOutcome::NoHand => {
                self.stats.no_hand += 1;
                debug!(frame = self.stats.frames, "no hand");
            }
            FrameOutcome::Rejected(err) => {
                self.stats.rejected += 1;
                warn!(frame = self.stats.frames, error = %err, "frame rejected");
            }
            FrameOutcome::BelowThreshold(best) => {
                self.stats.below_threshold += 1;
                debug!(frame = self.stats.frames, best = %best, "below threshold");
            }
            FrameOutcome::Stabilized(p) => {
                self.stats.accepted += 1;
                debug!(frame = self.stats.frames, prediction = %p, "stabilized");
            }
        }

        Ok(outcome)
    }

    fn evaluate(&mut self, detection: Detection) -> HandsignResult<FrameOutcome> {
        self.last_region = None;

        let Some(keypoints) = detection.hand else {
            return Ok(FrameOutcome::NoHand);
        };

        let pose = match detection.space {
            CoordinateSpace::Pixel => HandPose::from_keypoints(&keypoints),
            CoordinateSpace::Normalized => to_pixel_pose(&keypoints, detection.frame),
        };
        let pose = match pose {
            Ok(pose) => pose,
            Err(err) => return Ok(FrameOutcome::Rejected(err)),
        };

        self.last_region = self
            .normalizer
            .region_of_interest(detection.frame, Some(&pose));

        let Some(features) = self.normalizer.normalize(Some(&pose)) else {
            return Ok(FrameOutcome::NoHand);
        };
        if let Err(err) = self.normalizer.validate(features.as_slice()) {
            return Ok(FrameOutcome::Rejected(err));
        }

        let features = match self.smooth(features) {
            Ok(features) => features,
            Err(err) => return Ok(FrameOutcome::Rejected(err)),
        };

        let distribution = self.classifier.classify(&features)?;
        self.classify_outcome(&distribution)
    }

    fn smooth(&mut self, features: FeatureVector) -> HandsignResult<FeatureVector> {
        match self.smoother.as_mut() {
            Some(smoother) => smoother.push(features),
            None => Ok(features),
        }
    }

    fn classify_outcome(&mut self, distribution: &[f32]) -> HandsignResult<FrameOutcome> {
        let best = match self.gate.best(distribution) {
            Ok(best) => best,
            Err(err) => return Ok(FrameOutcome::Rejected(err)),
        };

        let candidate = match best {
            Some(p) if p.confidence > self.gate.threshold() => p,
            Some(p) => return Ok(FrameOutcome::BelowThreshold(p)),
            None => return Ok(FrameOutcome::BelowThreshold(Prediction::none())),
        };

        match self.stabilizer.accept_prediction(&candidate) {
            Ok(stabilized) => Ok(FrameOutcome::Stabilized(stabilized)),
            Err(err) if err.is_input_error() => Ok(FrameOutcome::Rejected(err)),
            Err(err) => Err(err),
        }
    }

    /// Clear the stabilizer and smoothing history
    pub fn reset(&mut self) {
        self.stabilizer.reset();
        if let Some(smoother) = self.smoother.as_mut() {
            smoother.clear();
        }
        self.last_region = None;
        info!("recognizer reset");
    }

    /// Current stabilized prediction
    pub fn current(&self) -> &Prediction {
        self.stabilizer.current()
    }

    pub fn phase(&self) -> StabilizerPhase {
        self.stabilizer.phase()
    }

    /// Hand region of interest from the last frame, if any
    pub fn last_region(&self) -> Option<PixelRect> {
        self.last_region
    }

    pub fn stats(&self) -> &RecognizerStats {
        &self.stats
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}
