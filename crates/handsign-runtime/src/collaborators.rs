//! Seams for the external collaborators: detector, classifier, renderer

use handsign_core::{FeatureVector, FrameBounds, HandsignResult, Keypoint, PixelRect, Prediction};

/// Coordinate convention of detector keypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// x, y already in frame pixels
    #[default]
    Pixel,
    /// x, y as fractions of frame width/height
    Normalized,
}

/// One frame's detector output
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Size of the analysed frame
    pub frame: FrameBounds,
    /// Keypoints of the chosen hand, `None` when no hand was found
    pub hand: Option<Vec<Keypoint>>,
    /// How `hand` coordinates are expressed
    pub space: CoordinateSpace,
}

impl Detection {
    /// No hand in this frame
    pub fn empty(frame: FrameBounds) -> Self {
        Detection {
            frame,
            hand: None,
            space: CoordinateSpace::Pixel,
        }
    }

    /// A hand in pixel coordinates
    pub fn pixels(frame: FrameBounds, keypoints: Vec<Keypoint>) -> Self {
        Detection {
            frame,
            hand: Some(keypoints),
            space: CoordinateSpace::Pixel,
        }
    }

    /// A hand in normalized [0, 1] coordinates
    pub fn normalized(frame: FrameBounds, keypoints: Vec<Keypoint>) -> Self {
        Detection {
            frame,
            hand: Some(keypoints),
            space: CoordinateSpace::Normalized,
        }
    }
}

/// Hand keypoint detector
///
/// When several hands are visible the detector picks one; the recognizer
/// always works on a single hand per frame.
pub trait HandDetector {
    type Frame;

    fn detect(&mut self, frame: &Self::Frame) -> HandsignResult<Detection>;
}

/// Gesture classifier
///
/// Returns one probability per label, in label-set order.
pub trait GestureClassifier {
    fn classify(&mut self, features: &FeatureVector) -> HandsignResult<Vec<f32>>;
}

/// What a renderer gets after every frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView<'a> {
    pub frame: FrameBounds,
    /// Stabilized prediction (may be the "none" prediction)
    pub prediction: &'a Prediction,
    /// Hand region of interest, if a hand was seen this frame
    pub region: Option<PixelRect>,
}

/// Display sink
pub trait Renderer {
    fn render(&mut self, view: &RenderView<'_>);
}

impl<F> GestureClassifier for F
where
    F: FnMut(&FeatureVector) -> HandsignResult<Vec<f32>>,
{
    fn classify(&mut self, features: &FeatureVector) -> HandsignResult<Vec<f32>> {
        self(features)
    }
}
